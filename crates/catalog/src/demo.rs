use crate::SceneDescriptor;

pub const DEFAULT_FILE_BASE_URL: &str = "https://files.homesee.xyz";

/// Built-in panoramas (living room, bedroom, kitchen). They double as the
/// texture fallback set for scenes without an image.
pub const DEMO_TEXTURE_URLS: [&str; 3] = [
    "https://files.homesee.xyz/api/files/download/%E5%AE%A2%E5%8E%85.jpg",
    "https://files.homesee.xyz/api/files/download/%E5%8D%A7%E5%AE%A4.jpg",
    "https://files.homesee.xyz/api/files/download/%E5%8E%A8%E6%88%BF.jpg",
];

pub fn demo_scenes() -> Vec<SceneDescriptor> {
    let [living, bedroom, kitchen] = DEMO_TEXTURE_URLS;
    vec![
        SceneDescriptor::new("1", "Living room", living).main(),
        SceneDescriptor::new("2", "Bedroom", bedroom),
        SceneDescriptor::new("3", "Kitchen", kitchen),
    ]
}

pub fn default_fallback_textures() -> Vec<String> {
    DEMO_TEXTURE_URLS.iter().map(|s| s.to_string()).collect()
}
