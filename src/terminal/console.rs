// src/terminal/console.rs

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::screens::{Notification, NotificationKind};

/// Entrada e saída do terminal. Genérico para poder rodar os testes em memória.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }

    pub async fn line(&mut self, text: &str) -> std::io::Result<()> {
        self.write(text).await?;
        self.write("\n").await
    }

    /// Lê uma linha sem o `\n`. `None` no fim da entrada.
    pub async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf).await? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Mostra o rótulo e lê a resposta. Fim da entrada vira texto vazio.
    pub async fn prompt(&mut self, label: &str) -> std::io::Result<String> {
        self.write(&format!("{label}: ")).await?;
        Ok(self.read_line().await?.unwrap_or_default())
    }

    /// Igual ao `prompt`, mas mantém `current` se a resposta vier vazia.
    pub async fn prompt_with_default(&mut self, label: &str, current: &str) -> std::io::Result<String> {
        let answer = self.prompt(&format!("{label} [{current}]")).await?;
        if answer.trim().is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Índice 1-based digitado pelo usuário, convertido para 0-based.
    pub async fn prompt_index(&mut self, label: &str) -> std::io::Result<Option<usize>> {
        let answer = self.prompt(label).await?;
        Ok(parse_index(&answer))
    }

    pub async fn notify(&mut self, notification: &Notification) -> std::io::Result<()> {
        let prefix = match notification.kind {
            NotificationKind::Error => "❌",
            NotificationKind::Success => "✅",
        };
        self.line(&format!(
            "{prefix} {}: {}",
            notification.title, notification.message
        ))
        .await
    }
}

pub fn parse_index(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
}
