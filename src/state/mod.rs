//! # ماژول وضعیت برنامه (Preference State)
//!
//! زبان و تم فعلی: یک مقدار برای کل process که بین اجراها ذخیره میشه.
//!
//! ## مفاهیم Rust:
//! - **watch channel**: آخرین مقدار + اطلاع دادن به subscriber‌ها
//! - **Generic + Trait Bound**: یک پیاده‌سازی برای زبان و تم
//! - **Arc<dyn Trait>**: ذخیره‌سازی قابل تعویض (SQLite یا حافظه)
//!
//! ## چرخه عمر
//! 1. شروع برنامه: خوندن از store (اگه نبود یا نامعتبر بود، مقدار پیش‌فرض)
//! 2. تغییر فقط با `set` یا `toggle`
//! 3. بعد از هر تغییر: به‌روزرسانی channel، اطلاع به subscriber‌ها، ذخیره
//!
//! خطای ذخیره‌سازی لاگ میشه ولی تغییر رو برنمیگردونه.

mod store;

pub use store::{MemoryPreferenceStore, PreferenceStore};

use std::fmt;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::models::{Language, TextDirection, Theme};

// =====================================
// Preference Trait
// =====================================
/// مقداری که به صورت کد متنی ذخیره میشه
pub trait Preference: Copy + Eq + Default + Send + Sync + fmt::Debug + 'static {
    /// کلید ذخیره‌سازی
    const KEY: &'static str;

    /// کد متنی برای ذخیره
    fn code(&self) -> &'static str;

    /// parse کد ذخیره شده؛ کد نامعتبر `None`
    fn parse(code: &str) -> Option<Self>;

    /// مقدار مقابل
    #[must_use]
    fn toggled(self) -> Self;
}

// =====================================
// Preference State
// =====================================
/// ظرف یک تنظیم
///
/// # مفاهیم:
/// - `Clone` ارزونه: همه clone‌ها به همون channel اشاره میکنن
/// - `write_lock`: تغییر و ذخیره پشت سر هم اتفاق میفتن، پس مقدار ذخیره شده
///   همیشه آخرین مقدار هست
///
/// # مثال
/// ```rust
/// use std::sync::Arc;
/// use portfolio_cms::{models::Language, state::{LanguageState, MemoryPreferenceStore}};
///
/// # #[tokio::main]
/// # async fn main() {
/// let state = LanguageState::load(Arc::new(MemoryPreferenceStore::new())).await;
/// assert_eq!(state.current_language(), Language::Fa);
///
/// state.toggle_language().await;
/// assert!(!state.is_right_to_left());
/// # }
/// ```
pub struct PreferenceState<P: Preference> {
    sender: Arc<watch::Sender<P>>,
    store: Arc<dyn PreferenceStore>,
    write_lock: Arc<Mutex<()>>,
}

/// وضعیت زبان
pub type LanguageState = PreferenceState<Language>;

/// وضعیت تم
pub type ThemeState = PreferenceState<Theme>;

impl<P: Preference> Clone for PreferenceState<P> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
            store: Arc::clone(&self.store),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<P: Preference> fmt::Debug for PreferenceState<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceState")
            .field("key", &P::KEY)
            .field("value", &self.get())
            .finish()
    }
}

impl<P: Preference> PreferenceState<P> {
    /// ساخت با مقدار ذخیره شده در store
    ///
    /// مقدار غایب، نامعتبر یا خطای خوندن همه به مقدار پیش‌فرض ختم میشن.
    pub async fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let initial = match store.get(P::KEY).await {
            Ok(Some(code)) => P::parse(&code).unwrap_or_else(|| {
                warn!(key = P::KEY, value = %code, "Ignoring invalid persisted preference");
                P::default()
            }),
            Ok(None) => P::default(),
            Err(e) => {
                warn!(key = P::KEY, error = %e, "Failed to read persisted preference");
                P::default()
            }
        };

        info!(key = P::KEY, value = initial.code(), "Preference loaded");
        Self::with_value(initial, store)
    }

    /// ساخت با مقدار مشخص، بدون خوندن store
    pub fn with_value(value: P, store: Arc<dyn PreferenceStore>) -> Self {
        let (sender, _receiver) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// مقدار فعلی
    #[must_use]
    pub fn get(&self) -> P {
        *self.sender.borrow()
    }

    /// تغییر مقدار
    ///
    /// اگه مقدار همون مقدار فعلی باشه هیچ کاری نمیکنه.
    /// برمیگردونه که آیا تغییری اتفاق افتاد.
    pub async fn set(&self, value: P) -> bool {
        let _guard = self.write_lock.lock().await;

        let changed = self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });

        if changed {
            debug!(key = P::KEY, value = value.code(), "Preference changed");
            self.persist(value).await;
        }
        changed
    }

    /// تغییر مقدار با کد متنی
    ///
    /// کد نامعتبر نادیده گرفته میشه و `false` برمیگرده.
    pub async fn set_code(&self, code: &str) -> bool {
        match P::parse(code) {
            Some(value) => self.set(value).await,
            None => {
                debug!(key = P::KEY, code, "Ignoring unsupported preference code");
                false
            }
        }
    }

    /// جابجایی بین دو مقدار؛ مقدار جدید رو برمیگردونه
    pub async fn toggle(&self) -> P {
        let _guard = self.write_lock.lock().await;

        let mut next = self.get();
        self.sender.send_modify(|current| {
            *current = current.toggled();
            next = *current;
        });

        debug!(key = P::KEY, value = next.code(), "Preference toggled");
        self.persist(next).await;
        next
    }

    /// گوش دادن به تغییرات
    ///
    /// receiver مقدار فعلی رو دیده شده علامت میزنه؛ `changed()` فقط
    /// برای تغییرات بعدی بیدار میشه.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<P> {
        self.sender.subscribe()
    }

    /// بررسی store
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.is_ok()
    }

    async fn persist(&self, value: P) {
        if let Err(e) = self.store.set(P::KEY, value.code()).await {
            warn!(key = P::KEY, value = value.code(), error = %e, "Failed to persist preference");
        }
    }
}

// =====================================
// Language
// =====================================
impl PreferenceState<Language> {
    /// زبان فعلی
    #[must_use]
    pub fn current_language(&self) -> Language {
        self.get()
    }

    /// آیا متن راست به چپ هست؟ (فقط برای فارسی)
    #[must_use]
    pub fn is_right_to_left(&self) -> bool {
        self.get().is_rtl()
    }

    /// جهت متن فعلی
    #[must_use]
    pub fn direction(&self) -> TextDirection {
        self.get().direction()
    }

    /// انتخاب زبان؛ فقط `fa` و `en` قبول میشن
    pub async fn set_language(&self, code: &str) -> bool {
        self.set_code(code).await
    }

    /// جابجایی بین فارسی و انگلیسی
    pub async fn toggle_language(&self) -> Language {
        self.toggle().await
    }
}

// =====================================
// Theme
// =====================================
impl PreferenceState<Theme> {
    /// تم فعلی
    #[must_use]
    pub fn current_theme(&self) -> Theme {
        self.get()
    }

    /// آیا تم تیره فعاله؟
    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.get().is_dark()
    }

    /// جابجایی بین روشن و تیره
    pub async fn toggle_theme(&self) -> Theme {
        self.toggle().await
    }
}
