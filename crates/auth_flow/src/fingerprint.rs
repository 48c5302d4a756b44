//! Device fingerprint: a stable identifier for a returning browser, derived
//! from coarse environment attributes. Used for step-up verification only;
//! it is not an authentication factor on its own. The app persists the value
//! and only recomputes it when storage is empty.

/// Browser attributes feeding the fingerprint. The web app fills this from
/// `navigator`/`screen`; tests construct it directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceProfile {
    pub user_agent: String,
    pub language: String,
    pub platform: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub timezone_offset_minutes: i32,
}

impl DeviceProfile {
    pub fn fingerprint(&self) -> String {
        let seed = format!(
            "{}|{}|{}|{}x{}|{}",
            self.user_agent,
            self.language,
            self.platform,
            self.screen_width,
            self.screen_height,
            self.timezone_offset_minutes
        );
        rolling_hash(&seed)
    }
}

/// 32-bit rolling hash (`h = h * 31 + ch`, wrapping), rendered as lowercase
/// hex. Collisions are acceptable: the backend treats the fingerprint as a
/// hint, not an identity.
fn rolling_hash(input: &str) -> String {
    let mut hash: i32 = 0;
    for ch in input.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    format!("{:08x}", hash.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> DeviceProfile {
        DeviceProfile {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
            language: "en-US".to_string(),
            platform: "Linux x86_64".to_string(),
            screen_width: 1920,
            screen_height: 1080,
            timezone_offset_minutes: -240,
        }
    }

    #[test]
    fn fingerprint_is_stable_for_the_same_profile() {
        assert_eq!(profile().fingerprint(), profile().fingerprint());
    }

    #[test]
    fn fingerprint_changes_when_an_attribute_changes() {
        let base = profile().fingerprint();

        let mut other = profile();
        other.screen_width = 1280;
        assert_ne!(base, other.fingerprint());

        let mut other = profile();
        other.language = "ar-AE".to_string();
        assert_ne!(base, other.fingerprint());
    }

    #[test]
    fn fingerprint_is_fixed_width_hex() {
        let value = profile().fingerprint();
        assert_eq!(value.len(), 8);
        assert!(value.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
