use lexportal_utils::{settings::structs::Settings, REQWEST_TIMEOUT, VERSION};
use reqwest::{Client, ClientBuilder};

pub fn client_builder(settings: &Settings) -> ClientBuilder {
  let user_agent = format!(
    "Lexportal/{VERSION}; +{}",
    settings.get_protocol_and_hostname()
  );
  Client::builder()
    .user_agent(user_agent)
    .timeout(REQWEST_TIMEOUT)
    .connect_timeout(REQWEST_TIMEOUT)
}
