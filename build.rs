use std::env;

fn main() {
    // ログレベルをビルド時に埋め込む（未指定なら info）
    match env::var("CALORIE_TRACKER_LOG_LEVEL") {
        Ok(level) if !level.trim().is_empty() => {
            println!("cargo:warning=CALORIE_TRACKER_LOG_LEVEL set to {}", level);
            println!("cargo:rustc-env=CALORIE_TRACKER_LOG_LEVEL={}", level.trim());
        }
        _ => {
            println!("cargo:rustc-env=CALORIE_TRACKER_LOG_LEVEL=info");
        }
    }

    // 環境変数変更時に再ビルド
    println!("cargo:rerun-if-env-changed=CALORIE_TRACKER_LOG_LEVEL");
}
