pub mod reqwest_forwarder;

pub use reqwest_forwarder::ReqwestProxyForwarder;
