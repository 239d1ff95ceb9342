//! Identity token payload decoding.

use crate::error::IdentityError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use paygate_core::Identity;

/// Reads the `email` claim from a compact identity token.
///
/// The token is `base64url(header).base64url(payload).signature`. Only the
/// payload is decoded; the signature is **not** checked. Callers must only
/// pass tokens received directly from the provider's token endpoint.
///
/// # Errors
///
/// Returns [`IdentityError::MalformedToken`] if the token does not have
/// three segments, the payload is not base64url JSON, or the payload has no
/// string `email` claim.
pub fn extract_identity(id_token: &str) -> Result<Identity, IdentityError> {
    let parts: Vec<&str> = id_token.split('.').collect();
    if parts.len() != 3 {
        return Err(IdentityError::MalformedToken {
            reason: format!("expected 3 segments, found {}", parts.len()),
        });
    }

    // Some issuers keep the padding even though the compact form omits it.
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| IdentityError::MalformedToken {
            reason: format!("failed to decode payload: {e}"),
        })?;

    let payload: serde_json::Value =
        serde_json::from_slice(&payload_bytes).map_err(|e| IdentityError::MalformedToken {
            reason: format!("failed to parse payload: {e}"),
        })?;

    let email = payload
        .get("email")
        .and_then(|v| v.as_str())
        .ok_or_else(|| IdentityError::MalformedToken {
            reason: "missing claim: email".to_string(),
        })?;

    Ok(Identity::new(email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn extracts_email_claim() {
        let token = token_with_payload(&json!({
            "iss": "https://accounts.google.com",
            "email": "a@x.com",
            "email_verified": true
        }));
        let identity = extract_identity(&token).expect("valid token");
        assert_eq!(identity.email(), "a@x.com");
    }

    #[test]
    fn accepts_padded_payload() {
        let header = URL_SAFE_NO_PAD.encode(b"{}");
        let body = base64::engine::general_purpose::URL_SAFE.encode(r#"{"email":"ab@x.co"}"#);
        let token = format!("{header}.{body}.sig");
        let identity = extract_identity(&token).expect("valid token");
        assert_eq!(identity.email(), "ab@x.co");
    }

    #[test]
    fn rejects_two_segments() {
        let err = extract_identity("header.payload").unwrap_err();
        assert!(matches!(err, IdentityError::MalformedToken { .. }));
    }

    #[test]
    fn rejects_four_segments() {
        let err = extract_identity("a.b.c.d").unwrap_err();
        assert!(matches!(err, IdentityError::MalformedToken { .. }));
    }

    #[test]
    fn rejects_non_base64_payload() {
        let err = extract_identity("header.!!!not-base64!!!.sig").unwrap_err();
        assert!(matches!(err, IdentityError::MalformedToken { .. }));
    }

    #[test]
    fn rejects_non_json_payload() {
        let body = URL_SAFE_NO_PAD.encode(b"not json");
        let err = extract_identity(&format!("h.{body}.s")).unwrap_err();
        assert!(matches!(err, IdentityError::MalformedToken { .. }));
    }

    #[test]
    fn rejects_missing_email() {
        let token = token_with_payload(&json!({ "sub": "1234" }));
        let err = extract_identity(&token).unwrap_err();
        assert_eq!(
            err,
            IdentityError::MalformedToken {
                reason: "missing claim: email".to_string()
            }
        );
    }

    #[test]
    fn rejects_non_string_email() {
        let token = token_with_payload(&json!({ "email": 42 }));
        let err = extract_identity(&token).unwrap_err();
        assert!(matches!(err, IdentityError::MalformedToken { .. }));
    }
}
