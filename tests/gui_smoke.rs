#[cfg(feature = "kittest")]
mod gui_smoke {
    use tracescope::kittest::harness_default;

    #[test]
    fn app_boots_and_renders_frames() {
        let mut harness = harness_default();
        harness.run_steps(1);
        std::thread::sleep(std::time::Duration::from_millis(10));
        harness.run_steps(2);
        let app = harness.state();
        assert_eq!(app.scope.views.len(), app.manager().channel_count());
        assert!(app.scope.views.len() >= 1);
        // the synthetic source keeps the write position moving
        assert!(app.manager().pos() > 0);
    }
}
