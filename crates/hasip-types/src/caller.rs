//! Caller-id normalization.

/// Extracts the user part from a raw SIP caller string.
///
/// Accepts the forms a SIP stack typically reports, such as
/// `"Alice" <sip:+4912345@pbx.local>`, `sip:100@10.0.0.1;transport=udp`,
/// `tel:+4912345` and bare `100@host`. Returns `None` when no user part is
/// present.
pub fn parse_caller(raw: &str) -> Option<String> {
    let mut uri = raw.trim();

    // Display name form: take what is inside the angle brackets.
    if let Some(start) = uri.find('<') {
        let rest = &uri[start + 1..];
        uri = match rest.find('>') {
            Some(end) => &rest[..end],
            None => rest,
        };
    }

    let uri = uri.trim();
    let uri = ["sips:", "sip:", "tel:"]
        .iter()
        .find_map(|scheme| strip_prefix_ignore_case(uri, scheme))
        .unwrap_or(uri);

    let user = uri.split(['@', ';', '?']).next().unwrap_or_default().trim();
    if user.is_empty() {
        None
    } else {
        Some(user.to_string())
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
