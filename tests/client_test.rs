use splaycli::spotify::client::ApiClient;

#[test]
fn endpoint_url_joins_with_exactly_one_slash() {
    let client = ApiClient::new("https://api.spotify.com/v1", "token");
    assert_eq!(
        client.endpoint_url("/me/player/recently-played"),
        "https://api.spotify.com/v1/me/player/recently-played"
    );
    assert_eq!(
        client.endpoint_url("me/player/recently-played"),
        "https://api.spotify.com/v1/me/player/recently-played"
    );
}

#[test]
fn endpoint_url_handles_trailing_base_slash() {
    let client = ApiClient::new("https://api.spotify.com/v1/", "token");
    assert_eq!(
        client.endpoint_url("/me/player/recently-played"),
        "https://api.spotify.com/v1/me/player/recently-played"
    );
}
