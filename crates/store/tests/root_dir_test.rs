use stocklens_core::store::port::QuoteStore;
use stocklens_store::config::{get_root_dir, set_root_dir};
use stocklens_store::quotes::SqliteQuoteStore;
use tempfile::tempdir;

// 根目录是进程级设置，单独放在一个测试二进制中
#[tokio::test]
async fn test_store_uses_configured_root_dir() {
    let tmp_dir = tempdir().expect("Failed to create temp dir");
    let root = tmp_dir.path().join("nested");
    set_root_dir(root.clone());
    assert_eq!(get_root_dir(), root);

    // 第二次设置被忽略
    set_root_dir(tmp_dir.path().join("other"));
    assert_eq!(get_root_dir(), root);

    let store = SqliteQuoteStore::new().await.expect("Failed to create quote store");
    assert!(store.load_history("600519", 5).await.unwrap().is_empty());
    assert!(root.join("quotes.db").exists());
}
