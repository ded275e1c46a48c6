//! Identity helpers for log output

/// Mask an identity key (email, phone, user id) for logging
///
/// Emails keep the first character of the local part and the domain,
/// anything else keeps its last four characters.
pub fn mask_identity(identity: &str) -> String {
    if let Some((local, domain)) = identity.split_once('@') {
        return match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        };
    }

    let chars: Vec<char> = identity.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    }
}

/// Normalize an identity key before it is used for storage or locking
pub fn normalize_identity(identity: &str) -> String {
    identity.trim().to_lowercase()
}
