#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing must never panic; a parsed query must run against an empty engine
    if let Ok(query) = bibsearch::parse_query(data) {
        let engine = bibsearch::SearchEngine::new(bibsearch::Corpus::default());
        let _ = engine.search(&query);
    }
});
