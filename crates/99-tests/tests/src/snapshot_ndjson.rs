#![cfg(all(test, not(target_arch = "wasm32")))]
//! Records NDJSON arbiter snapshots over a short handover script and compares them to a golden.

use app::{ControlLoop, SharedArbiter};
use arbiter::{AliveFlag, ArbiterConfig, Source, SourceId};
use std::fs;
use std::path::PathBuf;

const GOLDEN_PATH: &str = "tests/golden/ndjson/arbiter_handover.ndjson";

fn capture_ndjson(slot: &SharedArbiter<&'static str>) -> String {
    let mut line = serde_json::to_string(&slot.snapshot()).expect("serialize snapshot");
    line.push('\n');
    line
}

fn record_script() -> Vec<String> {
    let slot = SharedArbiter::with_config(ArbiterConfig::labeled("rotation"));
    let mut control = ControlLoop::builder()
        .target(slot.clone())
        .build()
        .expect("loop builds");

    let aura_running = AliveFlag::new(true);
    let idle = Source::with_id(SourceId::from_raw(1), || true);
    let scaffold = Source::with_id(SourceId::from_raw(2), || true);
    let aura = Source::with_id(SourceId::from_raw(3), aura_running.clone());

    slot.submit(&idle, -1, 1000, "idle").unwrap();
    slot.submit(&scaffold, 50, 3, "scaffold").unwrap();
    slot.submit(&aura, 100, 2, "aura").unwrap();

    let mut lines = Vec::with_capacity(5);
    lines.push(capture_ndjson(&slot));
    control.run_once();
    lines.push(capture_ndjson(&slot));
    aura_running.set(false);
    lines.push(capture_ndjson(&slot));
    control.run_once();
    lines.push(capture_ndjson(&slot));
    control.run_once();
    lines.push(capture_ndjson(&slot));
    lines
}

#[test]
fn handover_ndjson_matches_golden() {
    let actual = record_script().join("");
    let golden_path: PathBuf = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(GOLDEN_PATH);

    if std::env::var("UPDATE_GOLDEN").as_deref() == Ok("1") {
        fs::create_dir_all(golden_path.parent().unwrap()).expect("create golden directory");
        fs::write(&golden_path, &actual).expect("write golden fixture");
    }

    let expected = fs::read_to_string(&golden_path).expect("read golden ndjson");
    assert_eq!(actual, expected, "arbiter snapshot NDJSON differs from golden");
}
