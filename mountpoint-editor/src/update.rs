// SPDX-License-Identifier: GPL-3.0-only

use crate::error::EditError;
use crate::message::Message;
use crate::page::MountPointPage;

/// What the front-end should do after a message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Render,
    Help,
    Quit,
}

pub async fn update(page: &mut MountPointPage, message: Message) -> Result<Flow, EditError> {
    match message {
        Message::List => Ok(Flow::Render),
        Message::SetMountPoint {
            device,
            mount_point,
        } => {
            page.commit_custom_mount_point(&device, &mount_point).await?;
            Ok(Flow::Render)
        }
        Message::ClearMountPoint { device } => {
            page.select_mount_point(&device, "").await?;
            Ok(Flow::Render)
        }
        Message::SetReformat { device, checked } => {
            page.toggle_reformat(&device, checked).await?;
            Ok(Flow::Render)
        }
        Message::Reload => {
            // Failures reach the user through the page notifier.
            let _ = page.reload().await;
            Ok(Flow::Render)
        }
        Message::Help => Ok(Flow::Help),
        Message::Quit => Ok(Flow::Quit),
    }
}
