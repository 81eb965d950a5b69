pub mod daily;
pub mod decode;
pub mod request;
pub mod transport;

pub use daily::DailyFetcher;
pub use decode::decode_daily_series;
pub use transport::{
    HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient, TransportError, TransportFuture,
};
