//! End-to-end: catalog binding, file-backed persistence and checkout.

use bandstore_cart::notify::{self, RecordingNotifier};
use bandstore_cart::prelude::*;
use bandstore_storage::{Backend, FileBackend};

fn config() -> CartConfig {
    CartConfig::from_toml_str(
        r#"
        [checkout]
        encrypt_delay_ms = 1200
        redirect_delay_ms = 2000
        redirect_to = "index.html"
        "#,
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn checkout_clears_persisted_cart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config();
    let recorder = RecordingNotifier::new();

    let backend = FileBackend::open(dir.path()).unwrap();
    let mut store = CartStore::from_config(backend, &config)
        .unwrap()
        .with_notifier(recorder.clone());

    let binder = CatalogBinder::new(&config.catalog, config.currency().unwrap());
    let entries = vec![
        CatalogEntry::Product {
            index: 0,
            name: Some("Daily Essential Tee".into()),
            price_text: Some("\u{20b9}1,299".into()),
            image: Some("tee.png".into()),
            has_add_control: true,
        },
        CatalogEntry::Ticket {
            index: 1,
            city: Some("Singapore".into()),
            date: Some("22 Feb".into()),
            button_text: Some("\u{20b9}4,500".into()),
        },
    ];
    for binding in binder.bind_all(&entries) {
        binding.add_to(&mut store).unwrap();
    }

    // Reload from disk before checking out.
    let mut store = CartStore::from_config(store.close(), &config)
        .unwrap()
        .with_notifier(recorder.clone());
    assert_eq!(store.len(), 2);
    assert_eq!(store.state().total.amount_minor, 129_900 + 450_000);

    recorder.take();
    let mut flow = CheckoutFlow::new(config.checkout.clone());
    let receipt = flow.complete(&mut store).await.unwrap();

    assert_eq!(receipt.items.len(), 2);
    assert_eq!(receipt.total.display(), "\u{20b9}5,799");
    assert_eq!(receipt.redirect_to, "index.html");
    assert_eq!(
        recorder.messages(),
        vec![notify::MSG_ENCRYPTING_ORDER, notify::MSG_ORDER_COMPLETE]
    );

    let backend = store.close();
    assert_eq!(
        backend.get("sm_cart").unwrap().as_deref(),
        Some(r#"{"version":1,"items":[]}"#)
    );

    let store = CartStore::from_config(backend, &config).unwrap();
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn checkout_waits_both_delays_and_rerenders_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = config();
    let backend = FileBackend::open(dir.path()).unwrap();
    let mut store = CartStore::from_config(backend, &config).unwrap();
    store.add_item("p1", "Tee", 500, "img1").unwrap();

    let live = LiveView::new();
    store.subscribe(live.clone());

    let mut flow = CheckoutFlow::new(config.checkout.clone());
    let started = tokio::time::Instant::now();
    flow.complete(&mut store).await.unwrap();

    assert!(started.elapsed() >= std::time::Duration::from_millis(3200));
    assert_eq!(flow.step(), CheckoutStep::Redirected);
    assert!(live.current().unwrap().is_empty());
}
