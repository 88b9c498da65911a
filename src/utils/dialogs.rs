//! ブロッキングダイアログ（alert / confirm）

/// ユーザーへの通知と確認
pub trait Prompt {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// window.alert / window.confirm
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }
}

/// テスト用: 応答を固定し、表示されたメッセージを記録する
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPrompt {
    pub answer: bool,
    pub alerts: std::cell::RefCell<Vec<String>>,
    pub confirms: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl RecordingPrompt {
    pub fn accepting() -> Self {
        RecordingPrompt {
            answer: true,
            ..Default::default()
        }
    }

    pub fn declining() -> Self {
        RecordingPrompt::default()
    }
}

#[cfg(test)]
impl Prompt for RecordingPrompt {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer
    }
}
