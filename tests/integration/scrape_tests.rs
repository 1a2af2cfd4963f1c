//! Integration tests for a full scrape
//!
//! These tests use wiremock to serve a roster page and its detail pages and
//! check the CSV file a run leaves behind.

use clarke_roster::config::{Config, OutputConfig, ScraperConfig, UserAgentConfig};
use clarke_roster::output::read_csv;
use clarke_roster::record::DETAIL_FAILED_NOTE;
use clarke_roster::scrape::{user_agent_with_contact, DEFAULT_USER_AGENT};
use clarke_roster::{FetchError, FormatError, RosterError, RosterScraper};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROSTER_PATH: &str = "/photo/jailcurrent.asp";
const DETAIL_PATH: &str = "/photo/detailsNEW.asp";
const CONTACT: &str = "(Contact test@example.com)";

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, output_dir: &TempDir) -> Config {
    Config {
        scraper: ScraperConfig {
            root_url: format!("{}{}", server.uri(), ROSTER_PATH),
            timeout_secs: 5,
            retries: 0,
            delay_secs: 0,
        },
        user_agent: UserAgentConfig {
            contact: CONTACT.to_string(),
        },
        output: OutputConfig {
            directory: output_dir.path().join("data"),
            county_name: "athens-clarke".to_string(),
            facility: "Clarke County Jail".to_string(),
        },
    }
}

fn roster_row(id: &str, name: &str, sex: &str, race: &str, yob: &str) -> String {
    format!(
        "<tr><td>{id}</td><td><a href=\"##\" onclick=\"window.open('detailsNEW.asp?id={id}&amp;pg=1&amp;curr=yes', 'search', 'width=730')\">{name}</a></td>\
         <td>{sex}</td><td>{race}</td><td>3/14/2018 10:05:00 PM</td><td>THEFT</td><td>$500.00</td>\
         <td>2018-0001</td><td></td><td>{yob}</td><td>SAT</td></tr>"
    )
}

fn roster_page(rows: &[String]) -> String {
    format!(
        "<html><body><table>\
         <tr><th>MID#</th><th>NAME</th><th>SEX</th><th>RACE</th><th>BOOKING DATE</th>\
         <th>CHARGE</th><th>BOND AMOUNT</th><th>CASE NUMBER</th><th>POLICE CASE#</th>\
         <th>YEAR OF BIRTH</th><th>VISITATION</th></tr><tr></tr>{}</table></body></html>",
        rows.join("")
    )
}

fn detail_page(id: &str) -> String {
    format!(
        r#"<html><body>
        <table>
        <tr><td>Name:</td><td>SMITH, JOHN</td><td>MID#: {id}</td><td></td></tr>
        <tr><td>Address:</td><td>1 MAIN ST</td><td></td><td></td></tr>
        <tr><td>Sex:</td><td>MALE</td><td>Race:</td><td>WHITE</td></tr>
        <tr><td>Year of Birth:</td><td>1990</td><td>Height/Weight:</td><td>6'0" / 180</td></tr>
        <tr><td>Booking Date/Time:</td><td>3/14/2018 10:05:00 PM</td><td>Released Date/Time:</td><td>N/A</td></tr>
        </table>
        <table>
        <tr><th>ARRESTING AGENCY</th><th>GRADE OF CHARGE</th><th>CHARGE DESCRIPTION</th>
        <th>BOND AMOUNT</th><th>BOND REMARKS</th><th>BOND LAST UPDATED</th><th>DISPOSITION</th></tr>
        <tr><td>ACCPD</td><td>F</td><td>THEFT BY TAKING</td><td>$1,000.00</td><td>CASH</td><td>3/15/2018</td><td>SENTENCED</td></tr>
        </table>
        </body></html>"#
    )
}

async fn mount_head(server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

async fn mount_roster(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .and(query_param("id", id))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_scrape_with_failed_detail() {
    let server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_head(&server).await;
    Mock::given(method("GET"))
        .and(path(ROSTER_PATH))
        .and(header(
            "user-agent",
            user_agent_with_contact(DEFAULT_USER_AGENT, CONTACT).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(roster_page(&[
            roster_row("100", "SMITH, JOHN", "MALE", "WHITE", "1990"),
            roster_row("101", "DOE, JANE ANN", "FEMALE", "ASIAN", "1985"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_detail(
        &server,
        "100",
        ResponseTemplate::new(200).set_body_string(detail_page("100")),
    )
    .await;
    mount_detail(&server, "101", ResponseTemplate::new(500)).await;

    let config = create_test_config(&server, &output_dir);
    let scraper = RosterScraper::new(config).await.unwrap();
    let summary = scraper.run().await.unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.details_loaded, 1);
    assert_eq!(summary.details_failed, 1);
    assert!(summary.output_path.starts_with(output_dir.path().join("data")));

    let file_name = summary
        .output_path
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(file_name.starts_with("athens-clarke_current-inmate-roster_"));
    assert!(file_name.ends_with(".csv"));

    let records = read_csv(&summary.output_path).unwrap();
    assert_eq!(records.len(), 2);

    let loaded = &records[0];
    assert_eq!(loaded.inmate_id, "100");
    assert_eq!(loaded.inmate_lastname, "SMITH");
    assert_eq!(loaded.inmate_address, "1 MAIN ST");
    assert_eq!(loaded.agency, "ACCPD");
    assert_eq!(loaded.charges, "THEFT BY TAKING");
    assert_eq!(loaded.severity, "felony");
    assert_eq!(loaded.bond_amount, "$1000.00 CASH  Bond last updated 3/15/2018");
    assert_eq!(loaded.current_status, "SENTENCED");
    assert_eq!(
        loaded.url,
        format!("{}{}?id=100&pg=1&curr=yes", server.uri(), DETAIL_PATH)
    );
    assert_eq!(loaded.notes, "");

    let failed = &records[1];
    assert_eq!(failed.inmate_id, "101");
    assert_eq!(failed.inmate_middlename, "ANN");
    assert_eq!(failed.inmate_race, "asian");
    assert_eq!(failed.notes, DETAIL_FAILED_NOTE);
    assert_eq!(failed.charges, "");
    assert_eq!(
        failed.url,
        format!("{}{}", server.uri(), ROSTER_PATH)
    );
}

#[tokio::test]
async fn test_delay_follows_every_detail_request() {
    let server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_head(&server).await;
    mount_roster(
        &server,
        roster_page(&[
            roster_row("100", "SMITH, JOHN", "MALE", "WHITE", "1990"),
            roster_row("101", "DOE, JANE", "FEMALE", "WHITE", "1985"),
        ]),
    )
    .await;
    mount_detail(
        &server,
        "100",
        ResponseTemplate::new(200).set_body_string(detail_page("100")),
    )
    .await;
    mount_detail(&server, "101", ResponseTemplate::new(404)).await;

    let mut config = create_test_config(&server, &output_dir);
    config.scraper.delay_secs = 1;

    let started = Instant::now();
    let summary = clarke_roster::scrape::scrape(config).await.unwrap();
    let elapsed = started.elapsed();

    assert!(
        elapsed >= Duration::from_secs(2),
        "expected a pause after both detail pages, run took {:?}",
        elapsed
    );
    assert_eq!(summary.details_loaded, 1);
    assert_eq!(summary.details_failed, 1);
}

#[tokio::test]
async fn test_detail_for_unknown_inmate_is_skipped() {
    let server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_head(&server).await;
    mount_roster(
        &server,
        roster_page(&[roster_row("100", "SMITH, JOHN", "MALE", "WHITE", "1990")]),
    )
    .await;
    // detail page reports a different MID#
    mount_detail(
        &server,
        "100",
        ResponseTemplate::new(200).set_body_string(detail_page("999")),
    )
    .await;

    let config = create_test_config(&server, &output_dir);
    let summary = clarke_roster::scrape::scrape(config).await.unwrap();

    assert_eq!(summary.details_loaded, 0);
    assert_eq!(summary.details_failed, 1);

    let records = read_csv(&summary.output_path).unwrap();
    assert_eq!(records[0].notes, DETAIL_FAILED_NOTE);
}

#[tokio::test]
async fn test_changed_detail_layout_is_skipped() {
    let server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_head(&server).await;
    mount_roster(
        &server,
        roster_page(&[roster_row("100", "SMITH, JOHN", "MALE", "WHITE", "1990")]),
    )
    .await;
    mount_detail(
        &server,
        "100",
        ResponseTemplate::new(200).set_body_string("<html><body>Maintenance</body></html>"),
    )
    .await;

    let config = create_test_config(&server, &output_dir);
    let summary = clarke_roster::scrape::scrape(config).await.unwrap();

    assert_eq!(summary.records, 1);
    assert_eq!(summary.details_failed, 1);
}

#[tokio::test]
async fn test_roster_fetch_failure_aborts_run() {
    let server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_head(&server).await;
    Mock::given(method("GET"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = create_test_config(&server, &output_dir);
    let result = clarke_roster::scrape::scrape(config).await;

    assert!(matches!(
        result,
        Err(RosterError::Fetch(FetchError::Status { status: 503, .. }))
    ));
    assert!(!output_dir.path().join("data").exists());
}

#[tokio::test]
async fn test_roster_format_change_aborts_run() {
    let server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_head(&server).await;
    mount_roster(
        &server,
        "<html><body><table><tr><th>ID</th><th>NAME</th></tr></table></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&server, &output_dir);
    let result = clarke_roster::scrape::scrape(config).await;

    assert!(matches!(
        result,
        Err(RosterError::Format(FormatError::ColumnsChanged { .. }))
    ));
    assert!(!output_dir.path().join("data").exists());
}

#[tokio::test]
async fn test_empty_roster_writes_header_only() {
    let server = MockServer::start().await;
    let output_dir = TempDir::new().unwrap();

    mount_head(&server).await;
    mount_roster(&server, roster_page(&[])).await;

    let config = create_test_config(&server, &output_dir);
    let summary = clarke_roster::scrape::scrape(config).await.unwrap();

    assert_eq!(summary.records, 0);
    assert!(read_csv(&summary.output_path).unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_root_url_is_rejected() {
    let output_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;

    let mut config = create_test_config(&server, &output_dir);
    config.scraper.root_url = String::new();

    let result = RosterScraper::new(config).await;
    assert!(matches!(result, Err(RosterError::Config(_))));
}
