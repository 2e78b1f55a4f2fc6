mod common;

use std::time::Duration;

use anyhow::Result;
use shoppe_core::{ProductSearch, SearchError};
use shoppe_query::{FilterSpec, QueryCompiler, SortOrder};
use tokio::time::timeout;

use common::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_searches_share_one_backend() -> Result<()> {
    let search = ProductSearch::new(catalog().await, QueryCompiler::default());

    let mut handles = Vec::new();
    for i in 0..32 {
        let search = search.clone();
        handles.push(tokio::spawn(async move {
            let spec = if i % 2 == 0 { FilterSpec::new().query("sneakers").order(SortOrder::PriceLowToHigh) } else { FilterSpec::new().price_between(None, Some(100.0)) };
            search.search(&spec).await
        }));
    }

    let envelopes = timeout(Duration::from_secs(5), async {
        let mut envelopes = Vec::new();
        for handle in handles {
            envelopes.push(handle.await?);
        }
        Ok::<_, tokio::task::JoinError>(envelopes)
    })
    .await??;

    for (i, envelope) in envelopes.iter().enumerate() {
        let ids: Vec<&str> = envelope.products().iter().map(|p| p.id.as_str()).collect();
        if i % 2 == 0 {
            assert_eq!(ids, vec!["p-3", "p-1", "p-2"]);
        } else {
            assert_eq!(ids, vec!["p-5"]);
        }
    }
    Ok(())
}

#[tokio::test]
async fn failures_do_not_poison_later_searches() -> Result<()> {
    let failing = ProductSearch::new(FailingBackend::new(SearchError::backend("index offline")), QueryCompiler::default());
    let working = ProductSearch::new(catalog().await, QueryCompiler::default());

    for _ in 0..3 {
        let failed = failing.search(&FilterSpec::new()).await;
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("search backend error: index offline"));
    }
    assert_eq!(working.search(&FilterSpec::new()).await.count, 4);
    Ok(())
}
