//! 시스템 클립보드 포트 구현 어댑터.

use std::sync::OnceLock;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::application::ports::Clipboard;

/// 클립보드 매니저가 값을 가져갈 때까지 핸들을 유지하는 시간.
const HOLD_DURATION: Duration = Duration::from_secs(2);

struct CopyRequest {
    text: String,
    /// true면 유지 시간이 끝난 뒤에 응답한다(곧 종료할 프로세스용).
    reply_after_hold: bool,
    reply: mpsc::Sender<Result<(), String>>,
}

// 클립보드 관리 스레드 채널(최초 사용 시 1회 초기화)
static CLIPBOARD_SENDER: OnceLock<mpsc::Sender<CopyRequest>> = OnceLock::new();

/// 전용 스레드에서 arboard 클립보드를 다루는 어댑터.
/// Linux에서는 소유 프로세스가 핸들을 유지해야 클립보드 매니저가 값을 읽을 수 있다.
/// `copy`는 실제 설정 결과를 기다렸다가 실패를 그대로 돌려준다.
pub struct SystemClipboard {
    hand_off: bool,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    /// 값 설정 직후 반환한다. 핸들 유지는 백그라운드에서 계속된다(대화형 쉘).
    pub fn new() -> Self {
        Self { hand_off: false }
    }

    /// 핸들 유지 시간까지 기다린 뒤 반환한다(복사 직후 종료하는 one-shot 실행).
    pub fn hand_off() -> Self {
        Self { hand_off: true }
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let (reply, outcome) = mpsc::channel();
        clipboard_sender()
            .send(CopyRequest {
                text: text.to_string(),
                reply_after_hold: self.hand_off,
                reply,
            })
            .map_err(|_| anyhow!("clipboard worker is not running"))?;

        match outcome.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(anyhow!("clipboard unavailable: {err}")),
            Err(_) => Err(anyhow!("clipboard worker stopped before replying")),
        }
    }
}

fn clipboard_sender() -> &'static mpsc::Sender<CopyRequest> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = mpsc::channel::<CopyRequest>();
        thread::spawn(move || {
            for request in rx {
                serve(request);
            }
        });
        tx
    })
}

fn serve(request: CopyRequest) {
    let clipboard = arboard::Clipboard::new().and_then(|mut clipboard| {
        clipboard.set_text(request.text)?;
        Ok(clipboard)
    });

    let _clipboard = match clipboard {
        Ok(clipboard) => clipboard,
        Err(err) => {
            tracing::warn!(error = %err, "failed to set clipboard text");
            let _ = request.reply.send(Err(err.to_string()));
            return;
        }
    };

    if request.reply_after_hold {
        thread::sleep(HOLD_DURATION);
        let _ = request.reply.send(Ok(()));
    } else {
        let _ = request.reply.send(Ok(()));
        thread::sleep(HOLD_DURATION);
    }
}
