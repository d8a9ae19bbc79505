use fetch_normalize::{normalize, HttpResponse, Payload};

fn main() {
    env_logger::init();

    let url = std::env::args()
        .nth(1)
        .expect("usage: normalize <url>");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build Tokio runtime");
    runtime.block_on(async_main(&url));
}

async fn async_main(url: &str) {
    let response = match reqwest::Client::new().get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            log::error!("could not reach {}: {}", url, e);
            return;
        }
    };

    match normalize(HttpResponse::from(response)).await {
        Ok(reply) => match reply.payload {
            Payload::Json(value) => println!("JSON ({}): {:#}", reply.status, value),
            Payload::Text(text) => {
                println!("text ({}, ok: {}): {}", reply.status, reply.ok, text)
            }
        },
        Err(error) => {
            println!("{}", error);
            if !error.fields.is_empty() {
                println!("server fields: {:?}", error.fields);
            }
            if let Some(payload) = error.payload {
                println!("recovered payload: {}", payload);
            }
        }
    }
}
