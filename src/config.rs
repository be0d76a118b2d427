use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 9123;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub fn default_ips() -> Vec<IpAddr> {
    vec![
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 90)),
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 91)),
    ]
}

/// Settings for one invocation, built once and handed to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ips: Vec<IpAddr>,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ips: default_ips(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
