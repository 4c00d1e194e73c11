use std::time::Instant;

use reqwest::{Client, Error as RequestError};
use tracing::{instrument, Level};

/// The pre-selection page. Which region's slots it renders is controlled
/// by the postal-code cookie, not by the URL.
static PRESELECT_URL: &str = "https://www.grocerygateway.com/store/groceryGateway/en/pre-select";

pub fn make_client() -> Client {
    Client::builder()
        .gzip(true)
        .build()
        .expect("client creation should succeed")
}

/// One GET against the pre-selection page for `postal_code`. No retries;
/// a failed tick is the caller's problem.
pub async fn slots_page(client: &Client, postal_code: &str) -> Result<String, RequestError> {
    page_at(client, PRESELECT_URL, postal_code).await
}

#[instrument(skip_all, fields(postal = %postal_code), level = Level::TRACE)]
async fn page_at(client: &Client, url: &str, postal_code: &str) -> Result<String, RequestError> {
    let cookie = format!("groceryGateway-postalCode=\"RES,{postal_code}\"");
    let response = client.get(url).header("Cookie", cookie).send().await?;
    let start = Instant::now();
    let text = response.text().await?;
    log::trace!("got slot page body in \t {:?}", start.elapsed());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_the_postal_code_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/store/groceryGateway/en/pre-select"))
            .and(header("Cookie", "groceryGateway-postalCode=\"RES,m5v3v9\""))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client();
        let url = format!("{}/store/groceryGateway/en/pre-select", server.uri());
        let page = page_at(&client, &url, "m5v3v9").await.unwrap();
        assert_eq!(page, "<html></html>");
    }

    #[tokio::test]
    async fn surfaces_a_network_failure() {
        let client = make_client();
        // discard port, nothing listens there
        let res = page_at(&client, "http://127.0.0.1:9/pre-select", "m5v3v9").await;
        assert!(res.is_err());
    }
}
