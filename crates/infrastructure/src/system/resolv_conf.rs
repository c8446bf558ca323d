use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use tracing::{debug, warn};

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

pub const FALLBACK_NAMESERVER: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 53);

/// Extracts `nameserver` entries in file order. Unparseable addresses and
/// IPv6 zone suffixes (`fe80::1%eth0`) are skipped.
pub fn parse_nameservers(contents: &str) -> Vec<SocketAddr> {
    contents
        .lines()
        .map(|line| line.split(['#', ';']).next().unwrap_or("").trim())
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("nameserver"), Some(addr)) => addr.parse::<IpAddr>().ok(),
                _ => None,
            }
        })
        .map(|ip| SocketAddr::new(ip, 53))
        .collect()
}

/// First nameserver from `path`, or [`FALLBACK_NAMESERVER`] when the file is
/// missing or lists none.
pub fn nameserver_from(path: &Path) -> SocketAddr {
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse_nameservers(&contents).first() {
            Some(addr) => {
                debug!(path = %path.display(), nameserver = %addr, "Using system nameserver");
                *addr
            }
            None => {
                warn!(path = %path.display(), "No nameserver entries, using {}", FALLBACK_NAMESERVER);
                FALLBACK_NAMESERVER
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read resolver config, using {}", FALLBACK_NAMESERVER);
            FALLBACK_NAMESERVER
        }
    }
}

pub fn system_nameserver() -> SocketAddr {
    nameserver_from(Path::new(RESOLV_CONF_PATH))
}
