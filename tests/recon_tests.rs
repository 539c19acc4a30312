mod common;

use common::{target, ScriptedProbe};
use joomla_hunter::{preflight, Catalog, Outcome, Preflight, ScanConfig, ScanCoordinator};
use std::sync::Arc;

#[tokio::test]
async fn not_found_root_aborts() {
    let probe = ScriptedProbe::new().outcome("/", Outcome::NotFound).ok("/robots.txt");
    let result = preflight(&target(), &probe).await.unwrap();
    assert_eq!(result, Preflight::Aborted(Outcome::NotFound));
    assert_eq!(probe.request_count(), 1);
    assert!(!probe.requested("/index.php?option=com_content"));
}

#[tokio::test]
async fn transport_failure_aborts() {
    let probe = ScriptedProbe::new().outcome("/", Outcome::TransportFailure);
    let result = preflight(&target(), &probe).await.unwrap();
    assert_eq!(result, Preflight::Aborted(Outcome::TransportFailure));
}

#[tokio::test]
async fn any_status_code_is_live() {
    let probe = ScriptedProbe::new()
        .outcome("/", Outcome::StatusCode(403))
        .ok("/error_log");
    let Preflight::Ready(posture) = preflight(&target(), &probe).await.unwrap() else {
        panic!("expected a live site");
    };
    assert!(posture.live);
    assert!(!posture.robots_present);
    assert!(posture.error_log_present);
    assert!(posture.version_lines.is_empty());
}

#[tokio::test]
async fn collects_version_lines_in_order() {
    let manifest = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<extension type=\"file\">\n\t<version>4.4.2</version>\n</extension>";
    let readme = "1- Joomla! 4.4 Version\n2- What is this?";
    let probe = ScriptedProbe::new()
        .ok("/")
        .ok("/robots.txt")
        .ok("/administrator/manifests/files/joomla.xml")
        .body("/administrator/manifests/files/joomla.xml", manifest)
        .ok("/README.txt")
        .body("/README.txt", readme)
        .body("/language/en-GB/en-GB.xml", "<version>9.9.9</version>");
    let Preflight::Ready(posture) = preflight(&target(), &probe).await.unwrap() else {
        panic!("expected a live site");
    };
    assert!(posture.robots_present);
    assert_eq!(
        posture.version_lines,
        vec![
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>".to_string(),
            "\t<version>4.4.2</version>".to_string(),
            "1- Joomla! 4.4 Version".to_string(),
        ]
    );
    // The language file did not answer 200, so its body was never fetched.
    assert!(!posture.version_lines.iter().any(|l| l.contains("9.9.9")));
}

#[tokio::test]
async fn aborted_preflight_never_classifies() {
    let probe = Arc::new(ScriptedProbe::new().outcome("/", Outcome::NotFound));
    let catalog = Catalog::parse("com_content\ncom_users\n");

    let outcome = preflight(&target(), probe.as_ref()).await.unwrap();
    if let Preflight::Ready(posture) = outcome {
        let coordinator = ScanCoordinator::new(probe.clone(), &ScanConfig::default());
        coordinator.run(&target(), posture, catalog.entries()).await;
    }

    assert!(!probe.requested("/index.php?option=com_content"));
    assert!(!probe.requested("/index.php?option=com_users"));
}
