// ABOUTME: User-facing text shown by the step data screen and its advisories
// ABOUTME: Strings are Turkish to match the screen's audience

/// Title of warning advisories
pub const TITLE_WARNING: &str = "Uyarı";

/// Title of error advisories
pub const TITLE_ERROR: &str = "Hata";

/// Fetch attempted before the readiness gate opened
pub const NOT_READY: &str = "Lütfen Health Connect başlatılsın, sonra tekrar deneyin.";

/// Record query failed
pub const FETCH_FAILED: &str = "Adım verisi alınamadı.";

/// Permission negotiation failed
pub const PERMISSION_FAILED: &str = "Gerekli izinler alınamadı.";

/// `initialize()` reported that the provider is unsupported
pub const INIT_UNSUPPORTED: &str = "Health Connect başlatılamadı. Cihaz desteklemiyor olabilir.";

/// `initialize()` failed outright
pub const INIT_FAILED: &str = "Health Connect başlatılamadı.";

/// Label of the fetch trigger
pub const FETCH_BUTTON: &str = "Adımları Getir";

/// Row label for the step count
pub const LABEL_COUNT: &str = "Adım Sayısı";

/// Row label for the interval start
pub const LABEL_START: &str = "Başlangıç";

/// Row label for the interval end
pub const LABEL_END: &str = "Bitiş";

/// Screen title for a look-back window of `hours`
#[must_use]
pub fn screen_title(hours: u32) -> String {
    format!("Son {hours} Saatlik Adım Verisi")
}
