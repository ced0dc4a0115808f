//! Test fixtures and constants.

/// A config document with no envelopes.
pub const PLAIN_YAML: &str = "\
service:
  name: billing
  port: 8080
  # ENC[ appears in a comment but is not an envelope
  motto: \"ENC[KMS] is not an envelope either\"
";

/// A document with an envelope whose tag nobody recognizes.
pub const FOREIGN_TAG_YAML: &str = "token: ENC[VAULT,c2VjcmV0]\n";

/// A recognized KMS envelope whose body is not a valid payload.
pub const BROKEN_KMS_YAML: &str = "token: ENC[KMS,bm90IGpzb24=]\n";

/// Secret stored as a JSON object, as Secrets Manager key/value secrets are.
pub const DB_SECRET: &str = r#"{"username":"app","password":"hunter2","port":5432}"#;
