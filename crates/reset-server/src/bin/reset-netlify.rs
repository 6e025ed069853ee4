use lambda_runtime::{service_fn, Error, LambdaEvent};
use reset_config::ResetConfig;
use reset_server::netlify::{handle_event, NetlifyEvent, NetlifyResponse};
use reset_server::telemetry::{init_tracing, LogFormat};
use reset_supabase::SupabaseConnector;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing(LogFormat::Json);

    let connector = SupabaseConnector::default();

    lambda_runtime::run(service_fn(move |event: LambdaEvent<NetlifyEvent>| {
        let connector = connector.clone();
        async move {
            let config = ResetConfig::from_env();
            let response: NetlifyResponse = handle_event(event.payload, &config, &connector).await?;
            Ok::<_, Error>(response)
        }
    }))
    .await
}
