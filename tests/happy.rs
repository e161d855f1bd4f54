use profile_lookup::api::{Error, RepoSort};
use profile_lookup_app::{run, Args};
use rand::Rng;
use tokio;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPOS_PER_PAGE: u32 = 10;

fn args(server: &MockServer, username: Option<&str>) -> Args {
    Args {
        username: username.map(str::to_string),
        api_url: server.uri(),
        sort: RepoSort::Pushed,
        per_page: REPOS_PER_PAGE,
        shown: 5,
        user_agent: "profile-lookup-tests".to_string(),
        no_color: true,
    }
}

struct RepoFixture {
    name: String,
    stars: u32,
    forks: u32,
    language: Option<&'static str>,
}

fn random_repos(languages: &[Option<&'static str>]) -> Vec<RepoFixture> {
    let mut rng = rand::thread_rng();
    languages
        .iter()
        .enumerate()
        .map(|(index, language)| RepoFixture {
            name: format!("repo_{}", index),
            stars: rng.gen_range(0..5000),
            forks: rng.gen_range(0..500),
            language: *language,
        })
        .collect()
}

fn repos_body(repos: &[RepoFixture]) -> String {
    let mut body = String::from("[");
    for (index, repo) in repos.iter().enumerate() {
        let language = match repo.language {
            Some(language) => format!(r#""{}""#, language),
            None => "null".to_string(),
        };
        body.push_str(&format!(
            r#"{{
                "name": "{}",
                "html_url": "https://github.com/octocat/{}",
                "stargazers_count": {},
                "forks_count": {},
                "language": {}
            }}"#,
            repo.name, repo.name, repo.stars, repo.forks, language
        ));
        middle_coma(&mut body, index, repos.len() - 1);
    }
    body.push(']');
    body
}

fn user_body(login: &str) -> String {
    format!(
        r#"{{
            "login": "{}",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/{}",
            "public_repos": 8,
            "followers": 15000,
            "following": 9,
            "company": "@github",
            "location": null,
            "bio": ""
        }}"#,
        login, login
    )
}

async fn mock_user(server: &MockServer, login: &str, repos: &[RepoFixture]) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", login)))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .and(header("User-Agent", "profile-lookup-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(user_body(login), "application/json"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", login)))
        .and(query_param("sort", "pushed"))
        .and(query_param("per_page", format!("{}", REPOS_PER_PAGE)))
        .respond_with(ResponseTemplate::new(200).set_body_raw(repos_body(repos), "application/json"))
        .mount(server)
        .await;
}

async fn mock_missing(server: &MockServer, login: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", login)))
        .respond_with(ResponseTemplate::new(404).set_body_raw(r#"{"message": "Not Found"}"#, "application/json"))
        .mount(server)
        .await;
}

fn middle_coma(body: &mut String, index: usize, end: usize) {
    if index < end {
        body.push(',');
    }
}

#[tokio::test]
async fn octocat_lookup() {
    let server = MockServer::start().await;
    let repos = random_repos(&[Some("JavaScript"), Some("JavaScript"), Some("Ruby"), None]);
    mock_user(&server, "octocat", &repos).await;

    let mut out = Vec::new();
    run(args(&server, Some("octocat")), &b""[..], &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    let stars: u32 = repos.iter().map(|repo| repo.stars).sum();
    let forks: u32 = repos.iter().map(|repo| repo.forks).sum();
    assert!(out.starts_with("Searching...\n"));
    assert!(out.contains("\noctocat\n"));
    assert!(out.contains("Followers: 15000\n"));
    assert!(out.contains("Company:   @github\n"));
    assert!(out.contains("Location:  -\n"));
    assert!(out.contains("Bio:       -\n"));
    assert!(out.contains(&format!("Stars:     {}\n", stars)));
    assert!(out.contains(&format!("Forks:     {}\n", forks)));
    assert_eq!(out.matches("<https://github.com/octocat/repo_").count(), 4);
    assert!(out.contains(" JavaScript 2 (66.7%)\n"));
    assert!(out.contains(" Ruby 1 (33.3%)\n"));
    assert!(!out.contains("Error:"));
}

#[tokio::test]
async fn only_five_repositories_listed() {
    let server = MockServer::start().await;
    let repos = random_repos(&[Some("Rust"); 10]);
    mock_user(&server, "ferris", &repos).await;

    let mut out = Vec::new();
    run(args(&server, Some("ferris")), &b""[..], &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    let stars: u32 = repos.iter().map(|repo| repo.stars).sum();
    assert!(out.contains(&format!("Stars:     {}\n", stars)));
    for repo in &repos[..5] {
        assert!(out.contains(&format!(
            "  {} <https://github.com/octocat/{}>  ★ {} | ⑂ {}\n",
            repo.name, repo.name, repo.stars, repo.forks
        )));
    }
    for repo in &repos[5..] {
        assert!(!out.contains(&format!("<https://github.com/octocat/{}>", repo.name)));
    }
    assert!(out.contains(" Rust 10 (100.0%)\n"));
}

#[tokio::test]
async fn user_not_found() {
    let server = MockServer::start().await;
    mock_missing(&server, "this-user-does-not-exist-xyz").await;

    let mut out = Vec::new();
    let err = run(args(&server, Some("this-user-does-not-exist-xyz")), &b""[..], &mut out)
        .await
        .unwrap_err();
    let out = String::from_utf8(out).unwrap();

    assert!(matches!(err, Error::UserNotFound));
    assert!(out.contains("Error: User not found\n"));
    assert!(out.contains("\n-\n  Avatar:    https://avatars.githubusercontent.com/u/583231?v=4\n  Profile:   #\n"));
    assert!(out.contains("Stars:     -\n"));
    assert!(!out.contains("Top repositories"));
    assert!(!out.contains("Languages"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "Repositories must not be fetched for a missing user");
}

#[tokio::test]
async fn empty_username_makes_no_request() {
    let server = MockServer::start().await;

    let mut out = Vec::new();
    let err = run(args(&server, Some("   ")), &b""[..], &mut out).await.unwrap_err();

    assert!(matches!(err, Error::EmptyUsername));
    assert_eq!(String::from_utf8(out).unwrap(), "Please enter a GitHub username\n");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn interactive_session() {
    let server = MockServer::start().await;
    let repos = random_repos(&[Some("Go")]);
    mock_user(&server, "gopher", &repos).await;
    mock_missing(&server, "ghost").await;

    let mut out = Vec::new();
    let input = "\ngopher\nghost\ngopher\n";
    run(args(&server, None), input.as_bytes(), &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(out.matches("Please enter a GitHub username\n").count(), 1);
    assert_eq!(out.matches("username> ").count(), 5);
    assert_eq!(out.matches("Error: User not found\n").count(), 1);
    assert_eq!(out.matches(" Go 1 (100.0%)\n").count(), 2);
    assert!(out.ends_with("username> "));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
}

#[tokio::test]
async fn failed_repository_fetch_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(user_body("octocat"), "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000"),
        )
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = run(args(&server, Some("octocat")), &b""[..], &mut out).await.unwrap_err();
    let out = String::from_utf8(out).unwrap();

    assert!(matches!(err, Error::RateLimited { .. }));
    assert!(out.contains("Error: API rate limit exceeded, resets at 2023-11-14 22:13:20 UTC\n"));
    assert!(out.contains("Followers: -\n"));
    assert!(!out.contains("Languages"));
}

#[tokio::test]
async fn transport_failure_shows_its_cause() {
    let server = MockServer::start().await;
    let mut args = args(&server, Some("octocat"));
    args.api_url = "http://127.0.0.1:1".to_string();

    let mut out = Vec::new();
    let err = run(args, &b""[..], &mut out).await.unwrap_err();
    let out = String::from_utf8(out).unwrap();

    assert!(matches!(err, Error::Other(_)));
    let line = out
        .lines()
        .find(|line| line.starts_with("Error: "))
        .unwrap();
    assert!(line.starts_with("Error: Failed to send request to http://127.0.0.1:1/users/octocat: "));
    assert!(line.contains("connect"), "Missing underlying cause in {:?}", line);
    assert!(out.contains("Followers: -\n"));
}

#[tokio::test]
async fn malformed_profile_shows_its_cause() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = run(args(&server, Some("octocat")), &b""[..], &mut out).await.unwrap_err();
    let out = String::from_utf8(out).unwrap();

    assert!(matches!(err, Error::Other(_)));
    let line = out
        .lines()
        .find(|line| line.starts_with("Error: "))
        .unwrap();
    assert!(line.starts_with("Error: Failed to deserialize user response: "));
    assert!(line.contains("expected value"), "Missing underlying cause in {:?}", line);
    assert!(!out.contains("Languages"));
}

#[tokio::test]
async fn rate_limited_profile_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000"),
        )
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = run(args(&server, Some("octocat")), &b""[..], &mut out).await.unwrap_err();
    let out = String::from_utf8(out).unwrap();

    assert!(matches!(err, Error::UserNotFound));
    assert!(out.contains("Error: User not found\n"));
    assert!(!out.contains("rate limit"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
