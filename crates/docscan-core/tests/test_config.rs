use std::path::PathBuf;

use docscan_core::config::AppConfig;
use docscan_core::identity::{Identity, IdentityProvider};
use docscan_core::store::BackendConfig;
use docscan_core::transform::TransformKind;

#[test]
fn test_empty_config_uses_defaults() {
    let config = AppConfig::from_toml("").unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.transform, TransformKind::SimulatedPerspective);
    assert_eq!(config.upload.reset_delay_secs, 3);
    assert_eq!(config.upload.pdf_render_scale, 1.5);
    assert!(config.identity.is_none());
    assert!(!config.identity_provider().is_authenticated());
}

#[test]
fn test_full_config_parses() {
    let text = r#"
transform = "pass-through"

[backend]
kind = "local"
root = "/var/lib/docscan"

[identity]
user_id = "u1"
email = "u1@example.com"

[upload]
reset_delay_secs = 5
"#;
    let config = AppConfig::from_toml(text).unwrap();
    assert_eq!(config.transform, TransformKind::PassThrough);
    assert_eq!(
        config.backend,
        BackendConfig::Local {
            root: PathBuf::from("/var/lib/docscan")
        }
    );
    assert_eq!(config.upload.reset_delay_secs, 5);
    assert_eq!(config.upload.pdf_render_scale, 1.5);

    let provider = config.identity_provider();
    let identity = provider.current().unwrap();
    assert_eq!(identity.user_id, "u1");
    assert_eq!(identity.display_name(), "u1@example.com");
}

#[test]
fn test_memory_backend_parses() {
    let config = AppConfig::from_toml("[backend]\nkind = \"memory\"\n").unwrap();
    assert_eq!(config.backend, BackendConfig::Memory);
}

#[test]
fn test_example_survives_toml_round_trip() {
    let example = AppConfig::example();
    let text = example.to_toml().unwrap();
    let parsed = AppConfig::from_toml(&text).unwrap();
    assert_eq!(parsed, example);
    assert_eq!(parsed.identity, Some(Identity::new("local-user")));
}

#[test]
fn test_invalid_config_is_reported() {
    let result = AppConfig::from_toml("transform = \"sharpen\"");
    assert!(result.is_err());
}

#[test]
fn test_load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docscan.toml");
    std::fs::write(&path, "[identity]\nuser_id = \"from-file\"\n").unwrap();
    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.identity.unwrap().user_id, "from-file");

    assert!(AppConfig::load(&dir.path().join("missing.toml")).is_err());
}

#[cfg(feature = "supabase")]
#[test]
fn test_supabase_backend_parses_with_defaults() {
    let text = r#"
[backend]
kind = "supabase"
url = "https://project.supabase.co"
anon_key = "public-anon-key"
"#;
    let config = AppConfig::from_toml(text).unwrap();
    match config.backend {
        BackendConfig::Supabase(c) => {
            assert_eq!(c.bucket, "documents");
            assert_eq!(c.table, "documents");
            assert!(c.access_token.is_none());
        }
        other => panic!("unexpected backend {other}"),
    }
}
