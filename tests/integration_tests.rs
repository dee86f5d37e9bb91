use anyhow::Result;
use apple_music_info::core::{Artist, CollectionKind, Kind, PluginError, Track};
use apple_music_info::extractors::{build_image, classify, parse_track_link, AppleMusic, Page};
use apple_music_info::plugin::{AppleMusicPlugin, InfoPlugin};

fn test_track(url: &str) -> Track {
    Track {
        kind: Kind::Track,
        id: "1577621069".to_string(),
        title: "Bad Habits".to_string(),
        url: url.to_string(),
        thumbnail: "https://img/100x100.jpg".to_string(),
        artist: Artist {
            name: "Ed Sheeran".to_string(),
        },
        duration: None,
    }
}

#[tokio::test]
async fn test_plugin_validate() -> Result<()> {
    let plugin = AppleMusicPlugin::new();

    // Supported catalogue URLs
    assert!(plugin.validate("https://music.apple.com/us/song/shivers/1577621069"));
    assert!(plugin.validate("https://music.apple.com/us/album/thriller/269572838"));
    assert!(plugin.validate(
        "https://music.apple.com/us/album/bad-habits/1577620739?i=1577621069"
    ));
    assert!(plugin.validate(
        "https://music.apple.com/us/playlist/todays-hits/pl.f4d106fed2bd41149aaacabb233eb5eb"
    ));

    // Wrong domain, even with a matching path shape
    assert!(!plugin.validate("https://example.com/us/album/thriller/269572838"));
    // Right domain, unsupported page
    assert!(!plugin.validate("https://music.apple.com/us/artist/ed-sheeran/183313439"));
    assert!(!plugin.validate("https://music.apple.com"));
    assert!(!plugin.validate(""));

    Ok(())
}

#[tokio::test]
async fn test_classify_priority() -> Result<()> {
    // An album URL with an item-id parameter matches both the track and the
    // album shape; track wins.
    let ambiguous = "https://music.apple.com/us/album/divide/1193701079?i=1193701392";
    assert_eq!(classify(ambiguous), Some(Kind::Track));

    let plain_album = "https://music.apple.com/us/album/divide/1193701079";
    assert_eq!(classify(plain_album), Some(Kind::Album));

    Ok(())
}

#[tokio::test]
async fn test_resolve_rejects_unrecognized_url() -> Result<()> {
    let plugin = AppleMusicPlugin::new();

    // Classification fails before any network activity happens.
    let result = plugin
        .resolve("https://music.apple.com/us/artist/ed-sheeran/183313439")
        .await;
    assert!(matches!(result, Err(PluginError::InvalidUrl(_))));

    Ok(())
}

#[tokio::test]
async fn test_search_query_building() -> Result<()> {
    let plugin = AppleMusicPlugin::new();
    let track = test_track("https://music.apple.com/us/album/bad-habits/1577620739?i=1577621069");

    assert_eq!(plugin.search_query(&track), "Bad Habits Ed Sheeran");

    Ok(())
}

#[tokio::test]
async fn test_related_tracks_requires_url() -> Result<()> {
    let plugin = AppleMusicPlugin::new();
    let track = test_track("");

    let result = plugin.related_tracks(&track).await;
    assert!(matches!(result, Err(PluginError::InvalidInput(_))));

    Ok(())
}

#[tokio::test]
async fn test_track_link_parsing() -> Result<()> {
    let test_cases = vec![
        (
            "https://music.apple.com/us/album/bad-habits/1577620739?i=1577621069",
            Some(("bad-habits", "1577621069")),
        ),
        // No item-id parameter: precondition fails, nothing is fetched.
        ("https://music.apple.com/us/album/bad-habits/1577620739", None),
        // No album segment to take the name from.
        ("https://music.apple.com/us/song/shivers/1577621069", None),
        ("garbage", None),
    ];

    for (url, expected) in test_cases {
        let parsed = parse_track_link(url);
        let expected = expected.map(|(name, id)| (name.to_string(), id.to_string()));
        assert_eq!(parsed, expected, "{}", url);
    }

    Ok(())
}

#[tokio::test]
async fn test_image_template_expansion() -> Result<()> {
    assert_eq!(
        build_image("https://x/{w}x{h}.{f}", "100", "200", Some("png")),
        "https://x/100x200.png"
    );
    assert_eq!(
        build_image("https://x/{w}x{h}.{f}", "100", "200", None),
        "https://x/100x200.jpg"
    );

    Ok(())
}

#[tokio::test]
async fn test_track_extraction_from_fixture_page() -> Result<()> {
    let html = r#"<html><head>
        <script type="application/json" id="serialized-server-data">
        [{"data":{"seoData":{
            "appleContentId": "1577620739",
            "appleTitle": "Bad Habits - Single",
            "ogSongs": [{"id": "1577621069", "attributes": {
                "name": "Bad Habits",
                "url": "https://music.apple.com/us/album/bad-habits/1577620739?i=1577621069",
                "artistName": "Ed Sheeran",
                "artwork": {"url": "https://img/{w}x{h}.{f}", "width": 3000, "height": 3000}
            }}]
        }}}]
        </script>
    </head><body></body></html>"#;

    let page = Page::new(html.to_string());
    let track = AppleMusic::track_from_page(
        &page,
        "bad-habits",
        "1577621069",
        "https://music.apple.com/us/song/bad-habits/1577621069",
    )
    .expect("extraction should succeed");

    assert_eq!(track.id, "1577621069");
    assert_eq!(track.title, "Bad Habits");
    assert_eq!(track.artist.name, "Ed Sheeran");
    assert_eq!(track.thumbnail, "https://img/3000x3000.jpg");

    Ok(())
}

#[tokio::test]
async fn test_degraded_page_yields_nothing() -> Result<()> {
    let page = Page::new("<html><body>upstream maintenance</body></html>".to_string());

    assert!(
        AppleMusic::track_from_page(&page, "x", "1", "https://music.apple.com/us/song/x/1")
            .is_none()
    );
    assert!(AppleMusic::collection_from_page(
        &page,
        "https://music.apple.com/us/album/x/1",
        CollectionKind::Album
    )
    .is_none());
    assert!(AppleMusic::search_results(&page).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_track_serialization_carries_kind_tag() -> Result<()> {
    let track = test_track("https://music.apple.com/us/album/bad-habits/1577620739?i=1577621069");
    let json = serde_json::to_value(&track)?;

    assert_eq!(json["type"], "track");
    assert_eq!(json["artist"]["name"], "Ed Sheeran");

    Ok(())
}
