//! End-to-end tests for a browsing session: load a graph, expand and collapse
//! nodes against the in-memory transport.

use pretty_assertions::assert_eq;
use serde_json::json;
use sparql_browser::{Element, Error, MemoryTransport, NeighborColumns, ResultSet, Session};

const LABEL: &str = "<http://www.w3.org/2000/01/rdf-schema#label>";
const ROUTE: &str = "<https://ontologies.semanticarts.com/flights/hasRouteTo>";
const BOS: &str = "<http://ex/BOS>";
const JFK: &str = "<http://ex/JFK>";

const CONSTRUCT: &str = "CONSTRUCT routes from BOS";
const NEIGHBORS_JFK: &str = "SELECT neighbours of JFK";

fn construct_body() -> String {
    format!(
        "@prefix fl: <https://ontologies.semanticarts.com/flights/> .\n\
         {BOS} {ROUTE} {JFK} .\n\
         {BOS} {LABEL} \"BOS\" .\n\
         {JFK} {LABEL} \"JFK\" .\n\
         # done\n"
    )
}

fn neighbor_results() -> ResultSet {
    let uri = |v: &str| json!({"type": "uri", "value": v});
    serde_json::from_value(json!({
        "head": {"vars": ["s", "p", "obj", "obj_type", "obj_label"]},
        "results": {"bindings": [
            {"s": uri("http://ex/JFK"), "p": uri("https://ontologies.semanticarts.com/flights/hasRouteTo"),
             "obj": uri("http://ex/LGA"), "obj_type": uri("http://ex/Airport"),
             "obj_label": {"type": "literal", "value": "LaGuardia"}},
            {"s": uri("http://ex/JFK"), "p": uri("https://ontologies.semanticarts.com/flights/hasRouteTo"),
             "obj": uri("http://ex/EWR"), "obj_type": uri("http://ex/Airport")},
            {"s": uri("http://ex/JFK"), "p": uri("https://ontologies.semanticarts.com/flights/hasRouteTo"),
             "obj": uri("http://ex/LGA"), "obj_type": uri("http://ex/Airport"),
             "obj_label": {"type": "literal", "value": "LaGuardia"}}
        ]}
    }))
    .unwrap()
}

async fn loaded_session() -> (Session<MemoryTransport>, MemoryTransport) {
    let transport = MemoryTransport::new();
    transport.respond_raw(CONSTRUCT, construct_body());
    transport.respond_results(NEIGHBORS_JFK, neighbor_results());
    let mut session = Session::with_transport(transport.clone());
    session.load_graph(CONSTRUCT, BOS).await.unwrap();
    (session, transport)
}

// ============================================================================
// 1. Load
// ============================================================================

#[tokio::test]
async fn test_load_graph() {
    let (session, _) = loaded_session().await;
    assert_eq!(session.elements().len(), 3);
    assert_eq!(session.labels().get(JFK), Some("JFK"));

    let payload = session.elements_json().unwrap();
    assert_eq!(payload[0], json!({"data": {"id": BOS, "label": "BOS", "expanded": false, "source": BOS}}));
    assert_eq!(payload[2]["data"]["targetLabel"], "JFK");
}

#[tokio::test]
async fn test_load_graph_rejects_json_body() {
    let transport = MemoryTransport::new();
    transport.respond_results("SELECT", ResultSet::default());
    let mut session = Session::with_transport(transport);
    assert!(matches!(session.load_graph("SELECT", BOS).await, Err(Error::UnexpectedResponse(_))));
}

// ============================================================================
// 2. Expand
// ============================================================================

#[tokio::test]
async fn test_expand_merges_neighbourhood() {
    let (mut session, transport) = loaded_session().await;

    let added = session.expand(JFK, NEIGHBORS_JFK).await.unwrap();
    assert_eq!(added, 4, "two new nodes and two new edges");
    assert_eq!(session.elements().len(), 7);
    assert_eq!(session.labels().get("<http://ex/LGA>"), Some("LaGuardia"));

    let jfk = session.elements().iter().filter_map(Element::as_node).find(|n| n.id == JFK).unwrap();
    assert!(jfk.expanded);

    let lga = session
        .elements()
        .iter()
        .filter_map(Element::as_node)
        .find(|n| n.id == "<http://ex/LGA>")
        .unwrap();
    assert_eq!(lga.label, "LaGuardia");
    assert_eq!(lga.source, JFK);

    // A second expand is a no-op and does not hit the transport.
    assert_eq!(session.expand(JFK, NEIGHBORS_JFK).await.unwrap(), 0);
    assert_eq!(transport.queries().len(), 2);
}

#[tokio::test]
async fn test_merge_same_table_twice_is_idempotent() {
    let (mut session, _) = loaded_session().await;
    let table = session.query_table(NEIGHBORS_JFK).await.unwrap();
    session.merge_neighbors(&table, JFK).unwrap();
    let count = session.elements().len();
    assert_eq!(session.merge_neighbors(&table, JFK).unwrap(), 0);
    assert_eq!(session.elements().len(), count);
}

#[tokio::test]
async fn test_expand_unknown_node() {
    let (mut session, _) = loaded_session().await;
    assert!(matches!(session.expand("<http://ex/NOPE>", NEIGHBORS_JFK).await, Err(Error::NotFound(_))));
}

// ============================================================================
// 3. Failures leave the session untouched
// ============================================================================

#[tokio::test]
async fn test_failed_fetch_leaves_state() {
    let (mut session, transport) = loaded_session().await;
    transport.respond_error("SELECT failing", 500, "endpoint down");
    let before = session.elements().to_vec();
    let labels_before = session.labels().clone();

    assert!(matches!(session.expand(JFK, "SELECT failing").await, Err(Error::Transport { status: 500, .. })));
    assert_eq!(session.elements(), before.as_slice());
    assert_eq!(session.labels(), &labels_before);
}

#[tokio::test]
async fn test_missing_column_leaves_state() {
    let (session, transport) = loaded_session().await;
    let mut session = session.with_neighbor_columns(NeighborColumns {
        object: "target".into(),
        ..NeighborColumns::default()
    });
    let before = session.elements().to_vec();

    let err = session.expand(JFK, NEIGHBORS_JFK).await.unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "target"));
    assert_eq!(session.elements(), before.as_slice());
    assert_eq!(session.labels().get("<http://ex/LGA>"), None);
    assert_eq!(transport.queries().len(), 2);
}

// ============================================================================
// 4. Collapse and re-expand
// ============================================================================

#[tokio::test]
async fn test_collapse_then_reexpand_reproduces_state() {
    let (mut session, _) = loaded_session().await;
    let initial = session.elements().to_vec();

    session.expand(JFK, NEIGHBORS_JFK).await.unwrap();
    let expanded = session.elements().to_vec();

    let removed = session.collapse(JFK).unwrap();
    assert_eq!(removed, 4);
    assert_eq!(session.elements(), initial.as_slice());

    session.expand(JFK, NEIGHBORS_JFK).await.unwrap();
    assert_eq!(session.elements(), expanded.as_slice());
}

#[tokio::test]
async fn test_collapse_collapsed_node_is_noop() {
    let (mut session, _) = loaded_session().await;
    assert_eq!(session.collapse(JFK).unwrap(), 0);
    assert_eq!(session.elements().len(), 3);
}

// ============================================================================
// 5. Upload
// ============================================================================

#[tokio::test]
async fn test_upload_table_sends_update() {
    let (session, transport) = loaded_session().await;
    let table = session.query_table(NEIGHBORS_JFK).await.unwrap();
    let update = sparql_browser::export::insert_data_update(&table, "urn:neighbours").unwrap();
    transport.respond_raw(update.clone(), "");

    session.upload_table(&table, "urn:neighbours").await.unwrap();

    assert_eq!(transport.queries().last(), Some(&update));
    assert!(update.contains("DROP SILENT GRAPH <urn:neighbours> ;"));
    assert!(update.contains("<obj_label> \"LaGuardia\""));
    assert_eq!(update.matches("[ a <dataframe#row>").count(), 3);
}

#[tokio::test]
async fn test_upload_table_surfaces_endpoint_error() {
    let (session, _) = loaded_session().await;
    let table = session.query_table(NEIGHBORS_JFK).await.unwrap();
    let result = session.upload_table(&table, "urn:neighbours").await;
    assert!(matches!(result, Err(Error::Transport { status: 404, .. })));
}
