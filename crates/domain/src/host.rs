//! Host classification and zone-name derivation.

use std::net::IpAddr;

/// Label every directive zone is published under.
pub const BASE_ZONE: &str = "_redirect";

/// Label substituted for the leftmost host label in wildcard lookups.
pub const WILDCARD_LABEL: &str = "_";

/// Removes a trailing `:port` (and IPv6 brackets) from a request host.
pub fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match host.matches(':').count() {
        1 => host.split(':').next().unwrap_or(host),
        _ => host,
    }
}

/// True when the request host is a literal IPv4/IPv6 address.
///
/// Hosts whose last label is numeric are treated as addresses as well, since
/// no top-level domain is all digits.
pub fn is_ip_literal(host: &str) -> bool {
    let bare = strip_port(host);
    if bare.parse::<IpAddr>().is_ok() {
        return true;
    }
    if bare.matches(':').count() > 1 {
        return true;
    }
    bare.trim_end_matches('.')
        .rsplit('.')
        .next()
        .map(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// Host part of a zone, without the `_redirect.` prefix, port or trailing dot.
pub fn zone_host(zone: &str) -> &str {
    let zone = strip_port(zone).trim_end_matches('.');
    zone.strip_prefix(BASE_ZONE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(zone)
}

/// Fully qualified `_redirect.<host>.` name for a host or an existing zone.
pub fn absolute_zone(host_or_zone: &str) -> String {
    format!("{}.{}.", BASE_ZONE, zone_host(host_or_zone))
}

/// `_redirect._.<host>.`, the wildcard published at the apex itself.
pub fn apex_wildcard_zone(host_or_zone: &str) -> String {
    format!("{}.{}.{}.", BASE_ZONE, WILDCARD_LABEL, zone_host(host_or_zone))
}

/// `_redirect._.<host minus its leftmost label>.`
///
/// For a zone already under `_redirect.` the prefix itself is the leftmost
/// label, so `_redirect.up.example.com` becomes `_redirect._.up.example.com.`.
pub fn wildcard_zone(host_or_zone: &str) -> String {
    let host = zone_host(host_or_zone);
    if host != strip_port(host_or_zone).trim_end_matches('.') {
        return format!("{}.{}.{}.", BASE_ZONE, WILDCARD_LABEL, host);
    }
    let rest = host.split_once('.').map(|(_, rest)| rest).unwrap_or("");
    if rest.is_empty() {
        format!("{}.{}.", BASE_ZONE, WILDCARD_LABEL)
    } else {
        format!("{}.{}.{}.", BASE_ZONE, WILDCARD_LABEL, rest)
    }
}

/// Zone name with its first label removed, e.g. the registry suffix recorded
/// after following `use=_redirect.registry.example.com`.
pub fn strip_first_label(zone: &str) -> String {
    let zone = zone.trim_end_matches('.');
    zone.split_once('.')
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default()
}
