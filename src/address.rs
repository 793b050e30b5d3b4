//! Parsing the resolver's record format into a dialable address.

use phf::phf_map;

/// Scheme prefixes are exactly this many characters, matched
/// case-insensitively.
pub const SCHEME_PREFIX_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Sip,
    Sid,
}

static SCHEMES: phf::Map<&'static str, Scheme> = phf_map! {
    "sip://" => Scheme::Sip,
    "sid://" => Scheme::Sid,
};

/// Outcome of parsing the first line of resolver output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAddress {
    /// Empty line: the lookup found nothing. A valid terminal outcome.
    Unresolved,
    Sip(String),
    Sid(String),
    /// A non-empty line whose prefix we do not recognize. Fatal; this
    /// layer never guesses at schemes.
    UnknownScheme(String),
}

impl ResolvedAddress {
    /// Parse one resolver record line.
    ///
    /// The record format is `<scheme>://<address>:<number>:<name>`, but
    /// the resolver does not escape `:` occurring inside the address
    /// itself. The address is therefore cut at the first `:` after the
    /// 6-character scheme prefix, which keeps the trailing number and
    /// name fields out of the address. An address that legitimately
    /// contains a colon still mis-parses; that ambiguity comes with the
    /// upstream record format.
    pub fn parse(line: &str) -> Self {
        if line.is_empty() {
            return ResolvedAddress::Unresolved;
        }
        let Some(prefix) = line.get(..SCHEME_PREFIX_LEN) else {
            return ResolvedAddress::UnknownScheme(line.to_string());
        };
        let rest = &line[SCHEME_PREFIX_LEN..];
        match SCHEMES.get(prefix.to_ascii_lowercase().as_str()) {
            Some(Scheme::Sip) => ResolvedAddress::Sip(address_part(rest).to_string()),
            Some(Scheme::Sid) => ResolvedAddress::Sid(address_part(rest).to_string()),
            None => ResolvedAddress::UnknownScheme(line.to_string()),
        }
    }

    /// The dial string handed to the engine, or None for the
    /// non-address variants.
    pub fn destination(&self) -> Option<String> {
        match self {
            ResolvedAddress::Sip(address) => Some(format!("SIP/{address}")),
            ResolvedAddress::Sid(address) => Some(format!("VOMP/{address}")),
            ResolvedAddress::Unresolved | ResolvedAddress::UnknownScheme(_) => None,
        }
    }
}

fn address_part(rest: &str) -> &str {
    match rest.find(':') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_unresolved() {
        assert_eq!(ResolvedAddress::parse(""), ResolvedAddress::Unresolved);
    }

    #[test]
    fn sip_address_stops_at_first_colon_after_prefix() {
        let addr = ResolvedAddress::parse("sip://host:123:name");
        assert_eq!(addr, ResolvedAddress::Sip("host".to_string()));
        assert_eq!(addr.destination().unwrap(), "SIP/host");
    }

    #[test]
    fn sid_address_stops_at_first_colon_after_prefix() {
        let addr = ResolvedAddress::parse("sid://ab12:cd34:name");
        assert_eq!(addr, ResolvedAddress::Sid("ab12".to_string()));
        assert_eq!(addr.destination().unwrap(), "VOMP/ab12");
    }

    #[test]
    fn address_without_trailing_fields_is_taken_whole() {
        let addr = ResolvedAddress::parse(
            "sid://4C2CE74B83FDA5D75EBD83E838D4F7F6E1E9D38BE2E5B7F27D4CF3CEE7CD0C26",
        );
        assert_eq!(
            addr.destination().unwrap(),
            "VOMP/4C2CE74B83FDA5D75EBD83E838D4F7F6E1E9D38BE2E5B7F27D4CF3CEE7CD0C26"
        );
    }

    #[test]
    fn scheme_match_is_case_insensitive() {
        assert_eq!(
            ResolvedAddress::parse("SIP://host:1:n"),
            ResolvedAddress::Sip("host".to_string())
        );
        assert_eq!(
            ResolvedAddress::parse("Sid://ab:1:n"),
            ResolvedAddress::Sid("ab".to_string())
        );
    }

    #[test]
    fn unknown_prefix_is_preserved_raw() {
        assert_eq!(
            ResolvedAddress::parse("tel://123"),
            ResolvedAddress::UnknownScheme("tel://123".to_string())
        );
    }

    #[test]
    fn line_shorter_than_a_prefix_is_unknown() {
        assert_eq!(
            ResolvedAddress::parse("sip:/"),
            ResolvedAddress::UnknownScheme("sip:/".to_string())
        );
    }

    #[test]
    fn non_address_variants_have_no_destination() {
        assert_eq!(ResolvedAddress::Unresolved.destination(), None);
        assert_eq!(
            ResolvedAddress::UnknownScheme("tel://1".to_string()).destination(),
            None
        );
    }
}
