//! Shared plumbing for the SSO workspace: logging setup and wire types
//! used by more than one crate.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_serializes_code() {
        let body = types::ErrorBody { error: "invalid credentials".into(), code: 1001 };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 1001);
        assert_eq!(json["error"], "invalid credentials");
    }
}
