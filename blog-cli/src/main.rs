use std::process;

use anyhow::{Context, Result};
use blog_client::{
    BlogClient, BlogClientError, CommentInput, CommentResult, Form, Post, PostDetail, PostPage,
    ShareInput, ShareResult,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "CLI клиент для blog-server")]
struct Cli {
    /// Адрес HTTP-сервера.
    #[arg(long, global = true, env = "BLOG_HTTP_URL")]
    server: Option<String>,

    /// Печатать ответ сервера как JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список опубликованных постов.
    List {
        /// Номер страницы; некорректное значение сервер заменит на 1.
        #[arg(long)]
        page: Option<String>,
    },
    /// Пост по дате публикации и слагу.
    Show {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
        #[arg(long)]
        slug: String,
    },
    /// Поделиться постом по email.
    Share {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        comments: Option<String>,
    },
    /// Оставить комментарий к посту.
    Comment {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        body: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server);
    let client = BlogClient::new(server).map_err(map_client_error)?;

    match cli.command {
        Command::List { page } => {
            let page = client
                .list_posts(page.as_deref())
                .await
                .map_err(map_client_error)?;
            if cli.json {
                return print_json(&page);
            }
            print_page(&page);
        }
        Command::Show {
            year,
            month,
            day,
            slug,
        } => {
            let detail = client
                .get_post(year, month, day, &slug)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                return print_json(&detail);
            }
            print_detail(&detail);
        }
        Command::Share {
            id,
            name,
            email,
            to,
            comments,
        } => {
            let input = ShareInput {
                name,
                email,
                to,
                comments,
            };
            let result = client
                .share_post(id, &input)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                return print_json(&result);
            }
            print_share(&result);
        }
        Command::Comment {
            id,
            name,
            email,
            body,
        } => {
            let input = CommentInput { name, email, body };
            let result = client
                .comment(id, &input)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                return print_json(&result);
            }
            print_comment(&result);
        }
    }

    Ok(())
}

fn resolve_server(server: Option<String>) -> String {
    let raw = server.unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::NotFound => "пост не найден".to_string(),
        BlogClientError::MethodNotAllowed => "метод не поддерживается сервером".to_string(),
        BlogClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
    println!("{rendered}");
    Ok(())
}

fn print_post(post: &Post) {
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("url: {}", post.url);
    println!("author_id: {}", post.author_id);
    println!("publish: {}", post.publish);
}

fn print_form_errors(form: &Form) {
    for (field, messages) in &form.errors {
        for message in messages {
            println!("  {field}: {message}");
        }
    }
}

fn print_page(page: &PostPage) {
    println!(
        "Страница {} из {} (постов всего: {})",
        page.number, page.num_pages, page.total
    );

    for post in &page.posts {
        println!("- [{}] {} {}", post.id, post.title, post.url);
    }

    if page.has_next {
        println!("Следующая страница: --page {}", page.number + 1);
    }
}

fn print_detail(detail: &PostDetail) {
    println!("Пост");
    print_post(&detail.post);
    println!();
    println!("{}", detail.post.body);
    println!();
    println!("Комментариев: {}", detail.comments.len());
    for comment in &detail.comments {
        println!("- {} ({}): {}", comment.name, comment.created, comment.body);
    }
}

fn print_share(result: &ShareResult) {
    if result.sent {
        println!(
            "Пост «{}» отправлен на {}",
            result.post.title,
            result.form.data.get("to").map(String::as_str).unwrap_or("")
        );
        return;
    }

    println!("Письмо не отправлено, ошибки формы:");
    print_form_errors(&result.form);
}

fn print_comment(result: &CommentResult) {
    match &result.comment {
        Some(comment) => println!(
            "Комментарий добавлен: id={} к посту «{}»",
            comment.id, result.post.title
        ),
        None => {
            println!("Комментарий не добавлен, ошибки формы:");
            print_form_errors(&result.form);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_defaults_to_local_http() {
        assert_eq!(resolve_server(None), DEFAULT_HTTP_SERVER);
    }

    #[test]
    fn resolve_server_uses_custom_server() {
        let server = resolve_server(Some("localhost:9999".to_string()));
        assert_eq!(server, "http://localhost:9999");
    }

    #[test]
    fn map_client_error_explains_not_found() {
        let err = map_client_error(BlogClientError::NotFound);
        assert_eq!(err.to_string(), "пост не найден");
    }

    #[test]
    fn cli_parses_share_with_optional_comments() {
        let cli = Cli::try_parse_from([
            "blog-cli", "share", "--id", "3", "--name", "Ann", "--email", "ann@example.com",
            "--to", "bob@example.com",
        ])
        .expect("arguments must parse");

        match cli.command {
            Command::Share { id, comments, .. } => {
                assert_eq!(id, 3);
                assert!(comments.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
