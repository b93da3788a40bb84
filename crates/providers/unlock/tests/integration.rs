use entitle_domain::{AuthorizationStatus, Environment, Feature, Product, Target};
use entitle_manager::Manager;
use entitle_unlock_provider::UnlockProvider;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

#[tokio::test]
async fn unlock_provider_authorizes_bundled_features() {
    let manager = Manager::new();

    let scanner = Feature::new("document-scanner", "Document Scanner");
    manager.register_feature(scanner.clone()).await.unwrap();
    manager
        .register_product(Product::new("bundle.pro", "Pro Features", [scanner.identifier.clone()]))
        .await
        .unwrap();

    manager
        .add_provider(Arc::new(UnlockProvider::new(["bundle.pro"])))
        .await
        .unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _observer = manager
        .observe_products(
            vec!["bundle.pro".into()],
            vec!["document-scanner".into()],
            Environment::new("account-1"),
            None,
            move |update| {
                let _ = tx.send(update.clone());
            },
        )
        .await
        .unwrap();

    let initial = rx.recv().await.unwrap();
    assert_eq!(
        initial.get(&Target::Product("bundle.pro".into())),
        Some(&AuthorizationStatus::Granted)
    );
    assert_eq!(
        initial.get(&Target::Feature("document-scanner".into())),
        Some(&AuthorizationStatus::Granted),
        "a product grant must cover its bundled features"
    );
}

#[tokio::test]
async fn environment_scoped_unlock_abstains_elsewhere() {
    let manager = Manager::new();
    manager
        .register_product(Product::new("bundle.pro", "Pro Features", []))
        .await
        .unwrap();
    manager
        .add_provider(Arc::new(
            UnlockProvider::new(["bundle.pro"]).for_environment("enterprise"),
        ))
        .await
        .unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let counter = calls.clone();
    let _observer = manager
        .observe_products(
            vec!["bundle.pro".into()],
            vec![],
            Environment::new("personal"),
            None,
            move |update| {
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(update.clone());
            },
        )
        .await
        .unwrap();

    let initial = rx.recv().await.unwrap();
    assert_eq!(
        initial.get(&Target::Product("bundle.pro".into())),
        Some(&AuthorizationStatus::Unknown),
        "out-of-scope environments must resolve unknown, not denied"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
