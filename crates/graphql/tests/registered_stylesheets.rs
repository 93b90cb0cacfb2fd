//! `registeredStylesheets` connection queries.

mod common;

use serde_json::{json, Value};

use atrium_core::models::AssetKind;
use atrium_core::ports::AssetRegistry;
use atrium_core::services::PagerConfig;

use common::*;

const QUERY: &str = r#"
    query testRegisteredStylesheets($first: Int, $after: String, $last: Int, $before: String) {
        registeredStylesheets(first: $first, last: $last, before: $before, after: $after) {
            pageInfo {
                endCursor
                hasNextPage
                hasPreviousPage
                startCursor
            }
            nodes {
                extra
                handle
                id
                src
                version
            }
        }
    }
"#;

fn vars(first: Option<i32>, after: Option<&str>, last: Option<i32>, before: Option<&str>) -> Value {
    json!({ "first": first, "after": after, "last": last, "before": before })
}

fn nodes(response: &Value) -> Vec<Value> {
    response["data"]["registeredStylesheets"]["nodes"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

fn page_info(response: &Value) -> &Value {
    &response["data"]["registeredStylesheets"]["pageInfo"]
}

#[tokio::test]
async fn test_registered_stylesheets_query_pagination() {
    let store = fixture_store().await;
    let schema = schema_for(&store, PagerConfig::default());

    // Tout récupérer pour comparaison
    let all = execute(&schema, QUERY, vars(Some(500), None, None, None)).await;
    assert_no_errors(&all);
    let all_nodes = nodes(&all);
    assert_eq!(all_nodes.len(), 5);

    let snapshot = store.assets().snapshot(AssetKind::Stylesheet).await.unwrap();
    let expected = snapshot.get("dashicons").unwrap();
    assert_eq!(all_nodes[0]["handle"], json!("dashicons"));
    assert_eq!(all_nodes[0]["extra"], json!(expected.extra_data()));
    assert_eq!(all_nodes[0]["extra"], json!("/* dashicons */"));
    assert_eq!(all_nodes[1]["extra"], Value::Null);
    assert_eq!(all_nodes[0]["src"], json!(expected.src));
    assert_eq!(all_nodes[0]["version"], json!("6.4"));

    // Les deux premiers
    let first_two = execute(&schema, QUERY, vars(Some(2), None, None, None)).await;
    assert_eq!(nodes(&first_two), all_nodes[..2].to_vec());
    assert_eq!(page_info(&first_two)["hasNextPage"], json!(true));
    assert_eq!(page_info(&first_two)["hasPreviousPage"], json!(false));

    // `after` vide
    let empty_after = execute(&schema, QUERY, vars(Some(2), Some(""), None, None)).await;
    assert_eq!(empty_after["data"], first_two["data"]);

    // Les deux derniers
    let last_two = execute(&schema, QUERY, vars(None, None, Some(2), None)).await;
    assert_eq!(nodes(&last_two), all_nodes[3..].to_vec());
    assert_eq!(page_info(&last_two)["hasNextPage"], json!(false));
    assert_eq!(page_info(&last_two)["hasPreviousPage"], json!(true));

    // `before` vide
    let empty_before = execute(&schema, QUERY, vars(None, None, Some(2), Some(""))).await;
    assert_eq!(empty_before["data"], last_two["data"]);
}

#[tokio::test]
async fn test_page_before_cursor_between_first_and_last() {
    let schema = schema_for(&fixture_store().await, PagerConfig::default());

    let head = execute(&schema, QUERY, vars(Some(4), None, None, None)).await;
    let end = page_info(&head)["endCursor"].as_str().unwrap().to_string();

    // Fenêtre (after: dashicons, before: print)
    let first = execute(&schema, QUERY, vars(Some(1), None, None, None)).await;
    let start = page_info(&first)["endCursor"].as_str().unwrap().to_string();
    let window = execute(&schema, QUERY, vars(None, Some(&start), None, Some(&end))).await;
    assert_eq!(
        node_handles(&window, "registeredStylesheets"),
        vec!["admin-bar", "ie-only"]
    );
    assert_eq!(page_info(&window)["hasPreviousPage"], json!(true));
    assert_eq!(page_info(&window)["hasNextPage"], json!(true));

    // Dernier élément: aucune page suivante
    let tail = execute(&schema, QUERY, vars(None, None, Some(1), None)).await;
    let last = page_info(&tail)["endCursor"].as_str().unwrap().to_string();
    let empty = execute(&schema, QUERY, vars(Some(2), Some(&last), None, None)).await;
    assert_no_errors(&empty);
    assert!(nodes(&empty).is_empty());
    assert_eq!(page_info(&empty)["hasNextPage"], json!(false));
    assert_eq!(page_info(&empty)["startCursor"], Value::Null);
    assert_eq!(page_info(&empty)["endCursor"], Value::Null);
}

#[tokio::test]
async fn test_stylesheet_only_fields() {
    let schema = schema_for(&fixture_store().await, PagerConfig::default());
    let response = execute(
        &schema,
        "{ registeredStylesheets { nodes { handle src media args conditional after version dependencies { handle } } } }",
        json!({}),
    )
    .await;
    assert_no_errors(&response);

    let nodes = nodes(&response);
    assert_eq!(nodes[0]["media"], json!("all"));
    assert_eq!(nodes[1]["dependencies"], json!([{ "handle": "dashicons" }]));
    assert_eq!(nodes[1]["version"], json!(DEFAULT_STYLE_VERSION));
    assert_eq!(nodes[2]["conditional"], json!("lt IE 9"));
    assert_eq!(nodes[3]["media"], json!("print"));
    assert_eq!(nodes[3]["args"], json!("print"));
    assert_eq!(nodes[4]["src"], Value::Null);
    assert_eq!(nodes[4]["after"], json!([":root{--gap:1rem}"]));
}

#[tokio::test]
async fn test_empty_registry_yields_empty_page() {
    let store = atrium_storage::MemoryStore::new();
    let schema = schema_for(&store, PagerConfig::default());

    let response = execute(&schema, QUERY, vars(Some(10), None, None, None)).await;
    assert_no_errors(&response);
    assert!(nodes(&response).is_empty());
    assert_eq!(page_info(&response)["hasNextPage"], json!(false));
    assert_eq!(page_info(&response)["hasPreviousPage"], json!(false));
}

#[tokio::test]
async fn test_negative_last_is_rejected() {
    let schema = schema_for(&fixture_store().await, PagerConfig::default());
    let response = execute(&schema, QUERY, vars(None, None, Some(-1), None)).await;
    assert_eq!(first_error_code(&response), Some("INVALID_ARGUMENT"));
}
