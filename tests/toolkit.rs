//! Toolkit behaviour against in-process backends

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use domain_toolkit::{
    ads::{AdSlot, ScriptHost},
    api::{DomainApi, UserApi},
    consent::ConsentCategory,
    storage::MemoryStore,
    watch::{NavigationKind, WatchView},
    AppConfig, Availability, CheckRecord, Favorite, Result, Suggestion, Toolkit, ToolkitError,
};

#[derive(Default)]
struct FakeBackend {
    fail_lists: bool,
    fail_records: bool,
    checked: Mutex<Vec<String>>,
    recorded: Mutex<Vec<CheckRecord>>,
}

#[async_trait]
impl DomainApi for FakeBackend {
    async fn check_availability(&self, domain: &str) -> Result<Availability> {
        self.checked.lock().push(domain.to_string());
        if domain.starts_with("broken") {
            return Err(ToolkitError::api("upstream timeout", 502));
        }
        Ok(Availability {
            available: !domain.starts_with("taken"),
            domain: domain.to_string(),
            price: Some(12.0),
            currency: Some("USD".to_string()),
            period: Some(1),
        })
    }

    async fn public_suggestions(&self, _limit: usize) -> Result<Vec<Suggestion>> {
        if self.fail_lists {
            return Err(ToolkitError::network("connection refused", None, None));
        }
        Ok(vec![Suggestion {
            domain: "nova.ai".to_string(),
            score: Some(88.0),
            estimation_price: None,
            price: Some(900.0),
            status: None,
            category: None,
        }])
    }
}

#[async_trait]
impl UserApi for FakeBackend {
    async fn favorites(&self) -> Result<Vec<Favorite>> {
        if self.fail_lists {
            return Err(ToolkitError::api("Unauthorized", 401));
        }
        Ok(vec![])
    }

    async fn add_favorite(&self, domain: &str) -> Result<Favorite> {
        Ok(Favorite {
            id: "1".to_string(),
            domain: domain.to_string(),
            created_at: None,
        })
    }

    async fn remove_favorite(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn checks(&self, _limit: usize) -> Result<Vec<CheckRecord>> {
        if self.fail_lists {
            return Err(ToolkitError::api("Unauthorized", 401));
        }
        Ok(self.recorded.lock().clone())
    }

    async fn record_check(&self, record: &CheckRecord) -> Result<()> {
        if self.fail_records {
            return Err(ToolkitError::api("Unauthorized", 401));
        }
        self.recorded.lock().push(record.clone());
        Ok(())
    }
}

#[derive(Default)]
struct CountingHost {
    scripts: Mutex<u32>,
    slots: Mutex<Vec<String>>,
}

impl ScriptHost for CountingHost {
    fn inject_script(&self, _element_id: &str, _src: &str) -> Result<()> {
        *self.scripts.lock() += 1;
        Ok(())
    }

    fn register_slot(&self, slot: &AdSlot) -> Result<()> {
        self.slots.lock().push(slot.slot_id.clone());
        Ok(())
    }
}

fn toolkit(backend: Arc<FakeBackend>, host: Arc<CountingHost>) -> Toolkit {
    let config = AppConfig {
        storage_path: None,
        ..AppConfig::default()
    };
    Toolkit::new(config, backend.clone(), backend, Arc::new(MemoryStore::new()), host)
}

#[tokio::test]
async fn test_check_domain_records_history() {
    let backend = Arc::new(FakeBackend::default());
    let kit = toolkit(backend.clone(), Arc::default());

    let availability = kit.check_domain("Fresh.IO").await.unwrap();
    assert!(availability.available);
    assert_eq!(backend.checked.lock().as_slice(), ["fresh.io"]);

    let history = kit.recent_checks(10).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].domain, "fresh.io");
    assert_eq!(history[0].price, Some(12.0));
}

#[tokio::test]
async fn test_failed_record_does_not_fail_check() {
    let backend = Arc::new(FakeBackend {
        fail_records: true,
        ..FakeBackend::default()
    });
    let kit = toolkit(backend, Arc::default());

    let availability = kit.check_domain("taken.com").await.unwrap();
    assert!(!availability.available);
}

#[tokio::test]
async fn test_invalid_domain_never_reaches_backend() {
    let backend = Arc::new(FakeBackend::default());
    let kit = toolkit(backend.clone(), Arc::default());

    let err = kit.check_domain("not a domain").await.unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidInput { .. }));
    assert!(backend.checked.lock().is_empty());
}

#[tokio::test]
async fn test_batch_check_skips_failures() {
    let backend = Arc::new(FakeBackend::default());
    let kit = toolkit(backend, Arc::default());

    let domains = vec![
        "alpha.com".to_string(),
        "broken.com".to_string(),
        "taken.io".to_string(),
    ];
    let results = kit.check_domains(&domains).await;
    let names: Vec<&str> = results.iter().map(|a| a.domain.as_str()).collect();
    assert_eq!(names, vec!["alpha.com", "taken.io"]);
}

#[test]
fn test_lists_degrade_to_empty() {
    let backend = Arc::new(FakeBackend {
        fail_lists: true,
        ..FakeBackend::default()
    });
    let kit = toolkit(backend, Arc::default());

    assert!(tokio_test::block_on(kit.suggestions(5)).is_empty());
    assert!(tokio_test::block_on(kit.favorites()).is_empty());
    assert!(tokio_test::block_on(kit.recent_checks(5)).is_empty());
}

#[test]
fn test_suggestions_pass_through() {
    let kit = toolkit(Arc::default(), Arc::default());
    let suggestions = tokio_test::block_on(kit.suggestions(5));
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].display_price(), Some(900.0));
}

#[tokio::test]
async fn test_add_favorite_normalizes_domain() {
    let kit = toolkit(Arc::default(), Arc::default());
    let favorite = kit.add_favorite("  Shiny.Dev ").await.unwrap();
    assert_eq!(favorite.domain, "shiny.dev");
    assert!(kit.add_favorite("-bad-.com").await.is_err());
}

#[test]
fn test_ads_wait_for_marketing_consent() {
    let host = Arc::new(CountingHost::default());
    let kit = toolkit(Arc::default(), host.clone());
    let slot = AdSlot::new("sidebar");

    assert!(!kit.place_ad(&slot));
    assert_eq!(*host.scripts.lock(), 0);

    kit.consent().set(ConsentCategory::Marketing, true).unwrap();
    assert!(kit.place_ad(&slot));
    assert!(kit.place_ad(&AdSlot::new("footer")));

    assert_eq!(*host.scripts.lock(), 1);
    assert_eq!(host.slots.lock().as_slice(), ["sidebar", "footer"]);
}

#[test]
fn test_watch_reload_goes_home() {
    let kit = toolkit(Arc::default(), Arc::default());

    let view = kit.resolve_watch(
        "?video_url=https://cdn.example.org/ep1.mp4&home=https://anime.example.org/",
        NavigationKind::Reload,
    );
    assert_eq!(
        view,
        WatchView::Redirect {
            to: "https://anime.example.org/".to_string()
        }
    );

    let fallback = kit.resolve_watch("?home=javascript:alert(1)", NavigationKind::Reload);
    assert_eq!(
        fallback,
        WatchView::Redirect {
            to: kit.config().home_url.clone()
        }
    );
}

#[test]
fn test_watch_plays_valid_link() {
    let kit = toolkit(Arc::default(), Arc::default());
    match kit.resolve_watch(
        "?video_url=https%3A%2F%2Fcdn.example.org%2Fep2.mp4&title=Frieren&season=1&episode=2",
        NavigationKind::Navigate,
    ) {
        WatchView::Play(page) => {
            assert_eq!(page.video_url, "https://cdn.example.org/ep2.mp4");
            assert_eq!(page.title, "Frieren");
            assert!(page.subtitle.is_some());
        }
        other => panic!("expected player, got {:?}", other),
    }
}

#[test]
fn test_estimates_are_kept_in_session() {
    let kit = toolkit(Arc::default(), Arc::default());
    kit.estimate("first.com").unwrap();
    kit.estimate("second.io").unwrap();
    assert!(kit.estimate("").is_err());

    let history = kit.valuation_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].domain, "second.io");
}
