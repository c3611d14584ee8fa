use engine_logging::{
    generation_prefix, session_generation, set_session_generation, LogDestination,
};
use log::LevelFilter;

#[test]
fn prefix_is_empty_until_a_generation_is_set() {
    // Each test runs on its own thread, so the thread-local starts at zero.
    assert_eq!(session_generation(), 0);
    assert_eq!(generation_prefix(), "");

    set_session_generation(3);
    assert_eq!(session_generation(), 3);
    assert_eq!(generation_prefix(), "[gen 3] ");
}

#[test]
fn macros_accept_format_arguments() {
    engine_logging::initialize_for_tests();
    set_session_generation(7);
    let url = "https://youtu.be/abc123";
    engine_logging::engine_info!("submitted url={}", url);
    engine_logging::engine_debug!("progress={:.1}", 12.5_f64);
    engine_logging::engine_warn!("plain message");
    set_session_generation(0);
    assert_eq!(generation_prefix(), "");
}

#[test]
fn initializing_twice_keeps_the_first_logger() {
    engine_logging::initialize(LogDestination::Terminal, LevelFilter::Info);
    engine_logging::initialize(LogDestination::Terminal, LevelFilter::Debug);
    engine_logging::engine_info!("still logging");
}
