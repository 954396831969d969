mod mock_forwarders;

pub use mock_forwarders::*;
