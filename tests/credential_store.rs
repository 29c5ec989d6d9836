use pswd::core::store;
use pswd::models::location::{LocationRecord, ResourceKind};
use pswd::{CredentialService, PswdError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Fresh installation in `root` whose key file does not exist yet.
fn open_fresh(root: &Path) -> CredentialService {
    let config = root.join("assets/config.toml");
    let record = LocationRecord {
        data: root.join("assets/storage.json"),
        key: root.join("assets/private_key.pem"),
    };
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, toml::to_string(&record).unwrap()).unwrap();
    CredentialService::open(config).unwrap()
}

#[test]
fn test_first_use_generates_key_and_round_trips() {
    let dir = TempDir::new().unwrap();
    let svc = open_fresh(dir.path());
    let key_path = svc.registry().get_path(ResourceKind::Key).to_path_buf();
    assert!(!key_path.exists());

    svc.add("GitHub", "correct horse battery staple").unwrap();
    assert!(key_path.is_file());
    let pem = fs::read_to_string(&key_path).unwrap();
    assert!(pem.contains("BEGIN RSA PRIVATE KEY"));

    // A second process sees the same key and data.
    let again = CredentialService::open(svc.registry().config_path()).unwrap();
    assert_eq!(
        again.get("github").unwrap().as_str(),
        "correct horse battery staple"
    );
    assert_eq!(fs::read_to_string(&key_path).unwrap(), pem);
}

#[test]
fn test_full_lifecycle_with_relocation() {
    let dir = TempDir::new().unwrap();
    let mut svc = open_fresh(dir.path());

    svc.add("mail", "m1").unwrap();
    svc.add("bank", "b1").unwrap();
    assert!(matches!(svc.add("Mail", "m2"), Err(PswdError::DuplicateEntry(_))));
    svc.update("bank", "b2").unwrap();

    let raw = store::load(svc.storage_path()).unwrap();
    assert!(raw
        .values()
        .all(|v| v.len() == 512 && v.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())));

    let old = svc.storage_path().to_path_buf();
    let new = svc.relocate_store(&dir.path().join("vault/storage.json")).unwrap();
    assert!(!old.exists());

    let reopened = CredentialService::open(svc.registry().config_path()).unwrap();
    assert_eq!(reopened.storage_path(), new.as_path());
    let listed: Vec<(String, String)> = reopened
        .list_with_plaintext()
        .unwrap()
        .into_iter()
        .map(|(s, p)| (s, p.to_string()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("mail".to_string(), "m1".to_string()),
            ("bank".to_string(), "b2".to_string())
        ]
    );

    reopened.delete("mail").unwrap();
    assert!(matches!(reopened.delete("mail"), Err(PswdError::NotFound(_))));
    assert_eq!(reopened.list_services().unwrap(), vec!["bank"]);
}

#[test]
fn test_entries_from_another_key_fail_to_decrypt() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = open_fresh(first.path());
    let b = open_fresh(second.path());
    a.add("github", "x").unwrap();
    b.add("other", "y").unwrap();

    // Copy a's data file under b's key.
    fs::copy(a.storage_path(), b.storage_path()).unwrap();
    assert!(matches!(b.get("github"), Err(PswdError::Decryption(_))));
}
