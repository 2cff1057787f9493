//! IPv4 list/CIDR membership and IP anonymization.

use std::net::Ipv4Addr;

/// Splits a comma-separated IP/CIDR list, trimming entries and dropping
/// empty ones. An absent value yields an empty list, which never matches.
pub fn parse_ip_list(csv: Option<&str>) -> Vec<String> {
    let Some(csv) = csv else {
        return Vec::new();
    };
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_ipv4(ip: &str) -> Option<u32> {
    ip.parse::<Ipv4Addr>().ok().map(u32::from)
}

/// IPv4-only CIDR membership. Malformed prefixes or octets never match;
/// prefix 0 matches any address that itself parses as IPv4.
fn match_cidr(ip: &str, cidr: &str) -> bool {
    let Some((network, prefix_str)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix) = prefix_str.parse::<u32>() else {
        return false;
    };
    if prefix > 32 {
        return false;
    }

    let (Some(ip_num), Some(net_num)) = (parse_ipv4(ip), parse_ipv4(network)) else {
        return false;
    };

    let mask = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
    ip_num & mask == net_num & mask
}

/// True when `ip` equals a literal entry or falls inside a CIDR entry.
pub fn ip_in_list(ip: &str, list: &[String]) -> bool {
    list.iter().any(|entry| {
        if entry.contains('/') {
            match_cidr(ip, entry)
        } else {
            ip == entry.as_str()
        }
    })
}

/// IPv4 → zero the last octet; IPv6 (colon-containing) → zero the last
/// colon segment; anything else passes through unchanged.
pub fn anonymize_ip(ip: &str) -> String {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() == 4 {
        return format!("{}.{}.{}.0", parts[0], parts[1], parts[2]);
    }

    if ip.contains(':') {
        let mut segments: Vec<&str> = ip.split(':').collect();
        let last = segments.len() - 1;
        segments[last] = "0";
        return segments.join(":");
    }

    ip.to_string()
}
