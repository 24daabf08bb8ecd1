use quotes_api::{config::Config, init::init_database, routes, Data};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    data: Data,
    handle: tokio::task::JoinHandle<()>,
    _dir: Option<TempDir>,
}

fn test_config(database_url: String, max_connections: u32) -> Config {
    Config {
        database_url,
        bind_address: "127.0.0.1:0".parse().unwrap(),
        reset_database: true,
        max_connections,
        otlp_endpoint: None,
        defaulted: Vec::new(),
    }
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(test_config("sqlite::memory:".to_string(), 1), None).await
    }

    /// Spawns against a database file in a fresh temporary directory, with a
    /// pool wide enough for requests to really run side by side.
    async fn spawn_on_disk() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let database_url = format!("sqlite:{}", dir.path().join("quotes.db").display());

        Self::spawn_with(test_config(database_url, 20), Some(dir)).await
    }

    async fn spawn_with(config: Config, dir: Option<TempDir>) -> Self {
        let db = init_database(&config).await.expect("failed to init database");
        let data = Data { db };
        let app = routes::router(data.clone());

        let listener = tokio::net::TcpListener::bind(config.bind_address)
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            data,
            handle,
            _dir: dir,
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        let status = res.status();

        (status, res.json().await.unwrap())
    }

    async fn post_quote(&self, body: &Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(format!("{}/quotes/", self.base_url))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = res.status();

        (status, res.json().await.unwrap())
    }

    async fn author_rows(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM author;")
            .fetch_one(&self.data.db)
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn created_quote_matches_submission() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post_quote(&json!({
            "content": "Readability counts.",
            "author": "Tim Peters",
        }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Created new quote.");
    assert_eq!(body["quote"]["content"], "Readability counts.");
    assert_eq!(body["quote"]["author"]["first"], "Tim");
    assert_eq!(body["quote"]["author"]["last"], "Peters");
    assert_eq!(body["quote"]["author"]["formatted_name"], "Peters, Tim");
}

#[tokio::test]
async fn authors_are_reused_by_exact_name() {
    let server = TestServer::spawn().await;

    server
        .post_quote(&json!({ "content": "one", "author": "Tim Peters" }))
        .await;
    assert_eq!(server.author_rows().await, 1);

    let (status, body) = server
        .post_quote(&json!({ "content": "two", "author": "Tim Peters" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(server.author_rows().await, 1);

    server
        .post_quote(&json!({ "content": "three", "author": "Tim Berners-Lee" }))
        .await;
    assert_eq!(server.author_rows().await, 2);

    let author_id = body["quote"]["author"]["id"].as_i64().unwrap();
    let (status, body) = server.get(&format!("/authors/{author_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["formatted_name"], "Peters, Tim");
    assert_eq!(
        body["quotes"],
        json!([
            { "id": 1, "content": "one" },
            { "id": 2, "content": "two" },
        ])
    );
}

#[tokio::test]
async fn invalid_submissions_are_unprocessable() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post_quote(&json!({ "content": "", "author": "Tim Peters" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "content": ["Data not provided."] }));

    let (status, body) = server.post_quote(&json!({ "content": "x" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "author": ["Data not provided."] }));

    let (status, body) = server
        .post_quote(&json!({ "content": "x", "author": "Plato" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({ "author": { "last": ["Missing data for required field."] } })
    );

    assert_eq!(server.author_rows().await, 0);
}

#[tokio::test]
async fn missing_body_is_a_bad_request() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .post(format!("{}/quotes/", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "message": "No input data provided" })
    );

    let (status, _) = server.post_quote(&json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let res = server
        .client
        .post(format!("{}/quotes/", server.base_url))
        .header("content-type", "application/json")
        .body("{\"content\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_ids_are_reported() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get("/authors/42").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Author could not be found." }));

    let (status, body) = server.get("/quotes/42").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Quote could not be found." }));

    let (status, body) = server.get("/quotes/not-a-number").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not found." }));

    let (status, _) = server.get("/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_ids_are_not_routes() {
    let server = TestServer::spawn().await;

    for path in ["/authors/-1", "/quotes/-1"] {
        let (status, body) = server.get(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body, json!({ "message": "Not found." }));
    }

    let (status, body) = server.get(&format!("/quotes/{}", u64::MAX)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Quote could not be found." }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_all_succeed() {
    let server = TestServer::spawn_on_disk().await;

    let requests = (0..40).map(|i| {
        let client = server.client.clone();
        let url = format!("{}/quotes/", server.base_url);
        // half of them race on the same author
        let author = if i % 2 == 0 {
            "Tim Peters".to_string()
        } else {
            format!("Author{i} Number{i}")
        };

        tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({ "content": format!("quote {i}"), "author": author }))
                .send()
                .await
                .unwrap()
                .status()
        })
    });
    let requests: Vec<_> = requests.collect();

    for request in requests {
        assert_eq!(request.await.unwrap(), StatusCode::OK);
    }

    let tims: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM author WHERE first = 'Tim' AND last = 'Peters';",
    )
    .fetch_one(&server.data.db)
    .await
    .unwrap();
    assert_eq!(tims, 1);
    assert_eq!(server.author_rows().await, 21);

    let (_, body) = server.get("/quotes/").await;
    assert_eq!(body["quotes"].as_array().unwrap().len(), 40);
}

#[tokio::test]
async fn created_quote_round_trips_by_id() {
    let server = TestServer::spawn().await;
    let started = OffsetDateTime::now_utc().replace_nanosecond(0).unwrap();

    let (_, created) = server
        .post_quote(&json!({
            "content": "Errors should never pass silently.",
            "author": "Tim Peters",
        }))
        .await;
    let id = created["quote"]["id"].as_i64().unwrap();

    let (status, fetched) = server.get(&format!("/quotes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["quote"], created["quote"]);

    let posted_at = fetched["quote"]["posted_at"].as_str().unwrap();
    let posted_at = OffsetDateTime::parse(posted_at, &Rfc3339).unwrap();
    assert!(posted_at >= started);
}

#[tokio::test]
async fn listings_use_their_views() {
    let server = TestServer::spawn().await;

    server
        .post_quote(&json!({ "content": "first", "author": "Ada Lovelace" }))
        .await;
    server
        .post_quote(&json!({ "content": "second", "author": "Grace Hopper" }))
        .await;

    let (status, body) = server.get("/quotes/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "quotes": [
            { "id": 1, "content": "first" },
            { "id": 2, "content": "second" },
        ] })
    );

    let (_, without_slash) = server.get("/quotes").await;
    assert_eq!(without_slash, body);

    let (status, body) = server.get("/authors").await;
    assert_eq!(status, StatusCode::OK);
    let authors = body["authors"].as_array().unwrap();
    assert_eq!(authors.len(), 2);
    for author in authors {
        let expected = format!(
            "{}, {}",
            author["last"].as_str().unwrap(),
            author["first"].as_str().unwrap()
        );
        assert_eq!(author["formatted_name"], expected.as_str());
    }
}

#[tokio::test]
async fn status_reports_counts() {
    let server = TestServer::spawn().await;

    server
        .post_quote(&json!({ "content": "first", "author": "Ada Lovelace" }))
        .await;

    let (status, body) = server.get("/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authors"], 1);
    assert_eq!(body["quotes"], 1);
    assert!(body["version"].as_str().unwrap().starts_with("0.1.0"));
}
