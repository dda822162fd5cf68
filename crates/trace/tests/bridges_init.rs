//! Installing both bridges at once. Kept in its own binary because the
//! hooks are process-wide.

use proven_trace::Level;
use proven_trace::compat::init_with_bridges;
use proven_trace::test_support::capture_logger;

#[test]
fn test_init_with_bridges() {
    let (logger, buf) = capture_logger(Level::Info);
    init_with_bridges(logger.clone()).unwrap();

    log::warn!("from log");
    tracing::error!(attempt = 2, "from tracing");

    assert!(buf.contains("\tWARN\tfrom log"));
    assert!(buf.contains("\tERROR\tfrom tracing\t{\"attempt\": 2}"));

    // Second install fails on the log side first
    assert!(init_with_bridges(logger).is_err());
}
