use microserve::config::Config;
use std::path::PathBuf;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 35000);
    assert_eq!(cfg.static_root, "");
    assert_eq!(cfg.assets_dir, PathBuf::from("public"));
    assert_eq!(cfg.seed_users, vec!["Andres", "Maria", "Carlos"]);
    assert_eq!(cfg.listen_addr(), "127.0.0.1:35000");
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml("port: 8080\nstatic_root: /www\n").unwrap();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.static_root, "/www");
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.seed_users.len(), 3);
}

#[test]
fn test_config_full_yaml() {
    let yaml = r#"
host: 0.0.0.0
port: 9000
static_root: site
assets_dir: /srv/assets
seed_users: []
"#;
    let cfg = Config::from_yaml(yaml).unwrap();

    assert_eq!(cfg.listen_addr(), "0.0.0.0:9000");
    assert_eq!(cfg.assets_dir, PathBuf::from("/srv/assets"));
    assert!(cfg.seed_users.is_empty());
}

#[test]
fn test_config_empty_yaml_is_default() {
    assert_eq!(Config::from_yaml("").unwrap(), Config::default());
}

#[test]
fn test_config_rejects_bad_port() {
    assert!(Config::from_yaml("port: not-a-port").is_err());
    assert!(Config::from_yaml("port: 70000").is_err());
}

#[test]
fn test_config_missing_file_is_error() {
    let path = std::env::temp_dir().join("microserve-does-not-exist.yaml");
    assert!(Config::from_file(&path).is_err());
}

// All PORT handling lives in one test so parallel tests never race on the
// environment.
#[test]
fn test_config_port_env_override() {
    let path = std::env::temp_dir().join(format!("microserve-{}-cfg.yaml", std::process::id()));
    std::fs::write(&path, "port: 8081\n").unwrap();

    unsafe {
        std::env::remove_var("PORT");
    }
    assert_eq!(Config::load(Some(&path)).unwrap().port, 8081);

    unsafe {
        std::env::set_var("PORT", "3000");
    }
    assert_eq!(Config::load(Some(&path)).unwrap().port, 3000);

    unsafe {
        std::env::set_var("PORT", "three thousand");
    }
    assert!(Config::load(Some(&path)).is_err());

    unsafe {
        std::env::remove_var("PORT");
    }
    let _ = std::fs::remove_file(&path);
}
