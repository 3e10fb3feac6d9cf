/// Whether an image reference is unpinned
///
/// Matches any reference containing `latest` anywhere (not only as the tag,
/// so `mylatestbuild:v2` matches too) or with no `:` at all.
pub fn is_unpinned(image: &str) -> bool {
    image.contains("latest") || !image.contains(':')
}
