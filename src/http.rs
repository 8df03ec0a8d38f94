use serde_json::Value;

use crate::{
    helpers::convert_json_to,
    types::{ClientReturnType, HttpRequest, HttpResponse, MyInfoClientError, MyInfoHttpClient},
};

pub(crate) async fn request_async<T>(
    request: HttpRequest,
    http_client: &T,
) -> ClientReturnType<HttpResponse>
where
    T: MyInfoHttpClient,
{
    let expectations = request.expectations;

    let response = http_client
        .request(request)
        .await
        .map_err(|e| MyInfoClientError::new_network_error(&e, None))?;

    if !(200..300).contains(&response.status_code) {
        return Err(Box::new(MyInfoClientError::new_network_error(
            &format!("expected 2xx, got: {}", response.status_code),
            Some(response),
        )));
    }

    if expectations.body && response.body.is_none() {
        return Err(Box::new(MyInfoClientError::new_response_format_error(
            &format!(
                "expected {} with body but no body was returned",
                response.status_code
            ),
            Some(response),
        )));
    }

    if expectations.json_body {
        if let Some(body) = &response.body {
            if convert_json_to::<Value>(body).is_err() {
                return Err(Box::new(MyInfoClientError::new_response_format_error(
                    "unexpected body type",
                    Some(response),
                )));
            }
        }
    }

    Ok(response)
}
