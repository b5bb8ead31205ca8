use anyhow::Result;
use widgetry::tools::FutureLoader;
use widgetry::{EventCtx, State, Transition};

pub struct FileLoader;

impl FileLoader {
    /// Asks the user to pick a file with one of the extensions
    pub fn new_state<A: 'static>(
        ctx: &mut EventCtx,
        filter_name: &'static str,
        extensions: &'static [&'static str],
        on_load: Box<dyn FnOnce(&mut EventCtx, &mut A, Result<Option<Vec<u8>>>) -> Transition<A>>,
    ) -> Box<dyn State<A>> {
        let (_, outer_progress_rx) = futures_channel::mpsc::channel(1);
        let (_, inner_progress_rx) = futures_channel::mpsc::channel(1);
        FutureLoader::<A, Option<Vec<u8>>>::new_state(
            ctx,
            Box::pin(async move {
                let builder = rfd::AsyncFileDialog::new().add_filter(filter_name, extensions);
                let result = match builder.pick_file().await {
                    Some(file) => Some(file.read().await),
                    None => None,
                };
                let wrap: Box<dyn Send + FnOnce(&A) -> Option<Vec<u8>>> =
                    Box::new(move |_: &A| result);
                Ok(wrap)
            }),
            outer_progress_rx,
            inner_progress_rx,
            "Waiting for a file to be chosen",
            on_load,
        )
    }
}
