/// Runs store work from an event handler. Every store call is a short
/// synchronous SQLite round trip, so it runs inline on the UI thread.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T,
{
    f()
}
