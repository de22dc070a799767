//! Cross-crate scenario tests for arbiters driven by the control loop.

#[cfg(test)]
mod contention;

#[cfg(test)]
mod snapshot_ndjson;

#[cfg(test)]
mod tests {
    use app::{ControlLoop, SharedArbiter};
    use arbiter::{ArbiterConfig, Source};

    #[test]
    fn rejected_submit_does_not_disturb_running_loop() {
        let slot = SharedArbiter::with_config(ArbiterConfig::labeled("hotbar"));
        let mut control = ControlLoop::builder()
            .target(slot.clone())
            .build()
            .expect("loop builds");

        let swapper = Source::always_alive();
        slot.submit(&swapper, 3, 2, 5u8).unwrap();
        assert!(slot.submit(&swapper, 9, 0, 1u8).is_err());

        control.run_once();
        assert_eq!(slot.query_cloned(), Some(5));
        control.run_once();
        assert_eq!(slot.query_cloned(), None);
    }

    // Slow tests must be marked #[ignore] and prefixed with "slow_".
    #[test]
    #[ignore]
    fn slow_stress_many_sources() {
        let slot = SharedArbiter::with_config(ArbiterConfig::labeled("stress"));
        let mut control = ControlLoop::builder()
            .target(slot.clone())
            .build()
            .expect("loop builds");

        let sources: Vec<Source> = (0..256).map(|_| Source::always_alive()).collect();
        for step in 0..10_000u32 {
            for (index, source) in sources.iter().enumerate() {
                if (step as usize + index) % 7 == 0 {
                    let priority = ((index * 31 + step as usize) % 97) as i32;
                    slot.submit(source, priority, 1 + index as u32 % 5, index)
                        .unwrap();
                }
            }
            control.run_once();
        }

        assert_eq!(control.steps(), 10_000);
        assert!(slot.len() <= sources.len());
    }
}
