use dioxus::prelude::*;

/// Current `window.innerWidth`, updated on resize.
///
/// `None` until the browser has reported a width (always `None` during server rendering).
pub fn use_viewport_width() -> Signal<Option<u32>> {
    let mut width = use_signal(|| None);

    use_future(move || async move {
        let mut watcher = document::eval(
            r#"
            dioxus.send(window.innerWidth);
            window.addEventListener("resize", () => dioxus.send(window.innerWidth));
            await new Promise(() => {});
            "#,
        );

        while let Ok(reported) = watcher.recv::<u32>().await {
            if *width.peek() != Some(reported) {
                width.set(Some(reported));
            }
        }
    });

    width
}
