use crate::app::App;
use crate::model::DealType;
use crate::state::listing::{ListingField, ListingStep};
use crate::state::ModalState;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle input for whichever modal is open
pub fn handle_modal_input(key: KeyEvent, app: &mut App) {
    match app.store.modals().state() {
        ModalState::Closed => {}
        ModalState::SellForm => handle_listing_input(key, app, DealType::Sell),
        ModalState::BuyForm => handle_listing_input(key, app, DealType::Buy),
        ModalState::SellerInfo(_) => handle_seller_input(key, app),
        ModalState::MessageCompose(_) => handle_compose_input(key, app),
    }
}

fn handle_listing_input(key: KeyEvent, app: &mut App, kind: DealType) {
    if key.code == KeyCode::Esc {
        app.close_modal();
        return;
    }
    let form = match kind {
        DealType::Sell => &mut app.sell_form,
        DealType::Buy => &mut app.buy_form,
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab => {
            form.prev_step();
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if form.focus == ListingField::Choice => {
            form.cycle_option();
        }
        KeyCode::Char(c) => form.input_char(c),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Enter => {
            if form.step == ListingStep::Confirm {
                app.submit_listing(kind);
            } else {
                form.next_step();
            }
        }
        _ => {}
    }
}

fn handle_seller_input(key: KeyEvent, app: &mut App) {
    match key.code {
        // Replaces the seller card with the compose modal for the same deal
        KeyCode::Char('m') => app.open_message(),
        KeyCode::Esc | KeyCode::Enter => app.close_modal(),
        _ => {}
    }
}

fn handle_compose_input(key: KeyEvent, app: &mut App) {
    if key.code == KeyCode::Esc {
        app.close_modal();
        return;
    }
    if app.compose.is_sending {
        return;
    }
    match key.code {
        KeyCode::Char(c) => app.compose.text.push(c),
        KeyCode::Backspace => {
            app.compose.text.pop();
        }
        KeyCode::Enter => app.send_message(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{logged_in, press, type_str};
    use crate::state::ModalKind;

    #[test]
    fn buy_form_round_trip_through_keys() {
        let (mut app, _) = logged_in();
        press(&mut app, KeyCode::Char('b'));
        assert!(app.store.modals().is_open(ModalKind::Buy));

        type_str(&mut app, "급구 10만점");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "10a0000");
        assert_eq!(app.buy_form.points, "100000");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.buy_form.step, ListingStep::Price);

        type_str(&mut app, "95000");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.buy_form.step, ListingStep::Confirm);
        press(&mut app, KeyCode::Enter);
        assert!(!app.store.modals().any_open());
        assert_eq!(app.buy_form.step, ListingStep::Info);
    }

    #[test]
    fn seller_card_hands_over_to_compose() {
        let (mut app, _) = logged_in();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('m'));
        assert!(app.store.modals().is_open(ModalKind::Message));
        assert!(!app.store.modals().is_open(ModalKind::Seller));

        type_str(&mut app, "hi");
        press(&mut app, KeyCode::Esc);
        assert!(!app.store.modals().any_open());
        assert!(app.compose.text.is_empty());
    }
}
