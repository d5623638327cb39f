use rand::seq::SliceRandom;
use satim::OrderBuilder;
use std::sync::Arc;

const WRITERS: usize = 8;
const FIELDS_PER_WRITER: usize = 50;

fn prepared_draft() -> Arc<OrderBuilder> {
    let draft = Arc::new(OrderBuilder::new());
    draft
        .with_order_number("ORD-CONCURRENT")
        .with_amount(25000)
        .with_return_url("https://shop.example/return");
    draft
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_setters_lose_no_updates() {
    let draft = prepared_draft();

    let mut handles = Vec::new();
    for writer in 0..WRITERS {
        let draft = Arc::clone(&draft);
        handles.push(tokio::spawn(async move {
            let mut keys: Vec<usize> = (0..FIELDS_PER_WRITER).collect();
            keys.shuffle(&mut rand::thread_rng());
            for i in keys {
                draft.with_user_defined_field(format!("w{writer}_f{i}"), format!("v{writer}_{i}"));
                tokio::task::yield_now().await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let fields = draft.user_defined_fields();
    assert_eq!(fields.len(), WRITERS * FIELDS_PER_WRITER);
    for writer in 0..WRITERS {
        for i in 0..FIELDS_PER_WRITER {
            assert_eq!(
                fields.get(&format!("w{writer}_f{i}")).map(String::as_str),
                Some(format!("v{writer}_{i}").as_str())
            );
        }
    }

    let details = draft.generate_order_details().unwrap();
    assert_eq!(details.user_defined_fields(), &fields);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_finalize_while_writers_run() {
    let draft = prepared_draft();

    let mut writers = Vec::new();
    for writer in 0..4 {
        let draft = Arc::clone(&draft);
        writers.push(tokio::spawn(async move {
            for round in 0..200 {
                draft.with_user_defined_field(format!("udf{writer}"), format!("r{round}"));
                tokio::task::yield_now().await;
            }
        }));
    }

    let reader = {
        let draft = Arc::clone(&draft);
        tokio::spawn(async move {
            for _ in 0..200 {
                let details = draft.generate_order_details().unwrap();
                for value in details.user_defined_fields().values() {
                    assert!(value.starts_with('r'), "unexpected value {value}");
                }
                tokio::task::yield_now().await;
            }
        })
    };

    for writer in writers {
        writer.await.unwrap();
    }
    reader.await.unwrap();

    let fields = draft.user_defined_fields();
    assert_eq!(fields.len(), 4);
    assert!(fields.values().all(|value| value == "r199"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_write_wins_across_tasks() {
    let draft = prepared_draft();

    let first = {
        let draft = Arc::clone(&draft);
        tokio::spawn(async move {
            draft.with_user_defined_field("udf1", "first");
        })
    };
    first.await.unwrap();

    let second = {
        let draft = Arc::clone(&draft);
        tokio::spawn(async move {
            draft.with_user_defined_field("udf1", "second");
        })
    };
    second.await.unwrap();

    assert_eq!(draft.user_defined_field("udf1").as_deref(), Some("second"));
}
