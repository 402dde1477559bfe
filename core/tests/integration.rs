//! Dashboard lifecycle against the live server.
//!
//! # Design
//! Starts the server on a random port with an in-memory store, then drives
//! every endpoint through `DashboardClient` over real HTTP using ureq.

use dashboard_core::{
    ApiError, DashboardClient, DateRangeInput, HttpMethod, HttpRequest, HttpResponse, SaveTodo,
    ToastType,
};

/// Execute an `HttpRequest` with ureq, returning non-2xx statuses as data.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    HttpResponse::new(status, body)
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            dashboard_server::run(listener, dashboard_server::AppState::in_memory()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn dashboard_lifecycle() {
    let client = DashboardClient::new(&start_server());

    // Empty list.
    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    assert!(items.is_empty(), "expected empty list");

    // Create two items; they are appended.
    let milk = client
        .parse_save_item(execute(client.build_save_item(&SaveTodo::new("Buy milk")).unwrap()))
        .unwrap();
    let bob = client
        .parse_save_item(execute(client.build_save_item(&SaveTodo::new("Call Bob")).unwrap()))
        .unwrap();
    assert_eq!((milk.sort_order, bob.sort_order), (0, 1));

    // Edit the first one with a date range.
    let edit = SaveTodo {
        id: Some(milk.id),
        title: Some("Buy oat milk".to_string()),
        description: Some("the barista one".to_string()),
        date: Some(DateRangeInput {
            from: Some("2024-06-01T09:00".to_string()),
            to: Some("2024-06-01T10:00".to_string()),
        }),
    };
    let edited = client
        .parse_save_item(execute(client.build_save_item(&edit).unwrap()))
        .unwrap();
    assert_eq!(edited.id, milk.id);
    assert_eq!(edited.title, "Buy oat milk");
    assert_eq!(edited.sort_order, 0);

    let fetched = client.parse_get_item(execute(client.build_get_item(milk.id))).unwrap();
    assert_eq!(fetched, edited);

    // Blank title is rejected with a field error.
    let err = client
        .parse_save_item(execute(client.build_save_item(&SaveTodo::new("  ")).unwrap()))
        .unwrap_err();
    match err {
        ApiError::Validation(body) => assert!(body.errors.contains_key("title")),
        other => panic!("unexpected error: {other}"),
    }

    // Reorder, including an id that does not exist.
    let req = client.build_reorder(&[bob.id, 999, milk.id]).unwrap();
    client.parse_reorder(execute(req)).unwrap();
    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![bob.id, milk.id]);
    assert_eq!(items[1].sort_order, 2);

    // Done.
    let action = client
        .parse_complete_item(execute(client.build_complete_item(milk.id)))
        .unwrap();
    assert_eq!(action.message_type, Some(ToastType::Success));

    let err = client
        .parse_get_item(execute(client.build_get_item(milk.id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Done again is still a success.
    client
        .parse_complete_item(execute(client.build_complete_item(milk.id)))
        .unwrap();

    let items = client.parse_list_items(execute(client.build_list_items())).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, bob.id);
}
