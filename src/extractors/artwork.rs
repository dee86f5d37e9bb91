/// Fixed placeholder used whenever no artwork is discoverable.
pub const DEFAULT_THUMBNAIL: &str = "https://music.apple.com/assets/favicon/favicon-180.png";

/// Expand a templated artwork URL by substituting the literal `{w}`, `{h}`
/// and `{f}` markers. The format defaults to `jpg`. No validation or
/// encoding happens here; dimensions are passed through exactly as the
/// catalogue supplied them.
pub fn build_image(template: &str, width: &str, height: &str, ext: Option<&str>) -> String {
    template
        .replace("{w}", width)
        .replace("{h}", height)
        .replace("{f}", ext.unwrap_or("jpg"))
}
