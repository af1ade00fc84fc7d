use mmg_callbacks::{callback, callback_field_getter};

pub struct Download { url: String, done: bool }

#[callback(constructor = 1)]
#[callback_field_getter(field = "url", getter = "url()")]
#[callback_field_getter(field = "done", getter = "is_done")]
impl Download {
    pub fn start(url: &str, done: bool) -> Self {
        Self { url: url.to_owned(), done }
    }
    pub fn url(&self) -> &str { &self.url }
    pub fn is_done(&self) -> bool { self.done }
}

struct Printer;

impl DownloadCallbackListener for Printer {
    fn trigger(&self, url: String, done: bool) {
        let _ = (url, done);
    }
}

fn main() {
    DownloadCallback::instance().register_listener("print", Printer);
    DownloadCallback::instance().invoke_with_result(&Download::start("x", true), Some(|d: &Download| {
        let _ = d.is_done();
    }));
}
