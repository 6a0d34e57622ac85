use shared::{Book, BookPayload};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod services;

use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let books = use_state(Vec::<Book>::new);
    let message = use_state(|| Option::<String>::None);

    // Form state for creating and editing books
    let title = use_state(String::new);
    let author = use_state(String::new);
    let year = use_state(String::new);
    let genre = use_state(String::new);
    // When set, the form submits as an update of this book
    let editing_id = use_state(|| Option::<i64>::None);

    // Function to refresh the book list
    let refresh_books = {
        let books = books.clone();
        let message = message.clone();

        Callback::from(move |_: ()| {
            let books = books.clone();
            let message = message.clone();

            spawn_local(async move {
                match ApiClient::new().get_books().await {
                    Ok(response) => books.set(response.data),
                    Err(e) => message.set(Some(format!("Error fetching books: {}", e))),
                }
            });
        })
    };

    // Initial load
    {
        let refresh_books = refresh_books.clone();
        use_effect_with((), move |_| {
            refresh_books.emit(());
            || ()
        });
    }

    // Submit callback - creates a book, or updates the one being edited
    let on_submit = {
        let title = title.clone();
        let author = author.clone();
        let year = year.clone();
        let genre = genre.clone();
        let editing_id = editing_id.clone();
        let message = message.clone();
        let refresh_books = refresh_books.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let title = title.clone();
            let author = author.clone();
            let year = year.clone();
            let genre = genre.clone();
            let editing_id = editing_id.clone();
            let message = message.clone();
            let refresh_books = refresh_books.clone();

            spawn_local(async move {
                let payload = BookPayload {
                    title: non_empty((*title).clone()),
                    author: non_empty((*author).clone()),
                    year: (*year).trim().parse::<i64>().ok(),
                    genre: non_empty((*genre).clone()),
                };

                let result = match *editing_id {
                    Some(id) => ApiClient::new()
                        .update_book(id, &payload)
                        .await
                        .map(|_| "Book updated!"),
                    None => ApiClient::new()
                        .create_book(&payload)
                        .await
                        .map(|_| "Book added!"),
                };

                match result {
                    Ok(success) => {
                        // Clear the form and go back to create mode
                        title.set(String::new());
                        author.set(String::new());
                        year.set(String::new());
                        genre.set(String::new());
                        editing_id.set(None);
                        message.set(Some(success.to_string()));
                        refresh_books.emit(());
                    }
                    Err(e) => message.set(Some(e)),
                }
            });
        })
    };

    // Populate the form with an existing book for editing
    let on_edit = {
        let title = title.clone();
        let author = author.clone();
        let year = year.clone();
        let genre = genre.clone();
        let editing_id = editing_id.clone();

        Callback::from(move |book: Book| {
            title.set(book.title);
            author.set(book.author);
            year.set(book.year.map(|y| y.to_string()).unwrap_or_default());
            genre.set(book.genre.unwrap_or_default());
            editing_id.set(Some(book.id));
        })
    };

    let on_delete = {
        let message = message.clone();
        let refresh_books = refresh_books.clone();

        Callback::from(move |id: i64| {
            let message = message.clone();
            let refresh_books = refresh_books.clone();

            spawn_local(async move {
                match ApiClient::new().delete_book(id).await {
                    Ok(_) => {
                        message.set(Some("Book deleted!".to_string()));
                        refresh_books.emit(());
                    }
                    Err(e) => message.set(Some(e)),
                }
            });
        })
    };

    let on_title_input = input_setter(title.clone());
    let on_author_input = input_setter(author.clone());
    let on_year_input = input_setter(year.clone());
    let on_genre_input = input_setter(genre.clone());

    html! {
        <div class="container">
            <h1>{"Book Catalog"}</h1>

            {if let Some(msg) = (*message).as_ref() {
                html! { <p class="message">{msg}</p> }
            } else { html! {} }}

            <section class="book-form">
                <h3>
                    {if editing_id.is_some() { "Edit Book" } else { "Add New Book" }}
                </h3>
                <form onsubmit={on_submit}>
                    <input
                        placeholder="Title"
                        value={(*title).clone()}
                        oninput={on_title_input}
                        required={true}
                    />
                    <input
                        placeholder="Author"
                        value={(*author).clone()}
                        oninput={on_author_input}
                        required={true}
                    />
                    <input
                        placeholder="Year"
                        value={(*year).clone()}
                        oninput={on_year_input}
                    />
                    <input
                        placeholder="Genre"
                        value={(*genre).clone()}
                        oninput={on_genre_input}
                    />
                    <button type="submit">
                        {if editing_id.is_some() { "Save" } else { "Add Book" }}
                    </button>
                </form>
            </section>

            <section class="book-list">
                <h3>{"Books"}</h3>
                <table>
                    <thead>
                        <tr>
                            <th>{"Title"}</th>
                            <th>{"Author"}</th>
                            <th>{"Year"}</th>
                            <th>{"Genre"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for books.iter().map(|book| {
                            let edit = {
                                let on_edit = on_edit.clone();
                                let book = book.clone();
                                Callback::from(move |_| on_edit.emit(book.clone()))
                            };
                            let delete = {
                                let on_delete = on_delete.clone();
                                let id = book.id;
                                Callback::from(move |_| on_delete.emit(id))
                            };

                            html! {
                                <tr key={book.id}>
                                    <td>{&book.title}</td>
                                    <td>{&book.author}</td>
                                    <td>{book.year.map(|y| y.to_string()).unwrap_or_default()}</td>
                                    <td>{book.genre.clone().unwrap_or_default()}</td>
                                    <td>
                                        <button onclick={edit}>{"Edit"}</button>
                                        <button onclick={delete}>{"Delete"}</button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </section>
        </div>
    }
}

/// Keep a text field's state in sync with the input element
fn input_setter(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

/// Empty form fields become absent payload fields
fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
