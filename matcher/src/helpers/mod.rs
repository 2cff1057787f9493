pub mod header_spec;
pub mod ip;
pub mod locale;
pub mod regex;
