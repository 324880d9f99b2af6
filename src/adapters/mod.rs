// Adapters layer: concrete implementations of the domain ports (http, provider redirect, basket files).

pub mod basket_file;
pub mod http;
pub mod redirect;

pub use basket_file::LocalBasketFile;
pub use http::HttpSessionApi;
pub use redirect::HostedRedirect;
