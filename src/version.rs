use jni::sys::{jint, JNI_ERR, JNI_VERSION_1_2, JNI_VERSION_1_4, JNI_VERSION_1_6};

/// How a loader interprets the value returned from `JNI_OnLoad`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnLoadStatus {
    Accepted(jint),
    Failed,
    BadVersion(jint),
}

pub fn classify(version: jint) -> OnLoadStatus {
    match version {
        JNI_VERSION_1_2 | JNI_VERSION_1_4 | JNI_VERSION_1_6 => OnLoadStatus::Accepted(version),
        JNI_ERR => OnLoadStatus::Failed,
        other => OnLoadStatus::BadVersion(other),
    }
}

impl OnLoadStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, OnLoadStatus::Accepted(_))
    }

    /// The `UnsatisfiedLinkError` text a loader reports for `path`, if any.
    pub fn rejection(&self, path: &str) -> Option<String> {
        match self {
            OnLoadStatus::Accepted(_) => None,
            OnLoadStatus::Failed => {
                Some(format!("JNI_ERR returned from JNI_OnLoad in \"{}\"", path))
            }
            OnLoadStatus::BadVersion(v) => Some(format!(
                "Bad JNI version returned from JNI_OnLoad in \"{}\": {}",
                path, v
            )),
        }
    }
}
