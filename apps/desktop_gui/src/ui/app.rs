use client_core::{
    session::{ADD_TO_CART_LABEL, CART_HEADING, PAGE_TITLE},
    CartSection, StorefrontSession, StorefrontView,
    EMPTY_CART_MESSAGE, LOADING_MESSAGE, SUBMIT_LABEL,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::Product;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_command, reducer::reduce,
};

const CARD_WIDTH: f32 = 220.0;

pub struct StorefrontApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: StorefrontSession,
    status: String,
}

impl StorefrontApp {
    /// Mounting the window starts the one catalog fetch.
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            session: StorefrontSession::new(),
            status: String::new(),
        };
        dispatch_backend_command(&app.cmd_tx, BackendCommand::LoadCatalog, &mut app.status);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reduce(&mut self.session, &mut self.status, event);
        }
    }

    fn add_to_cart(&mut self, product: &Product) {
        self.session.add_to_cart(product);
    }

    fn submit_order(&mut self) {
        if let Some(request) = self.session.order_request() {
            self.status = "Submitting order...".to_string();
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::SubmitOrder { request },
                &mut self.status,
            );
        }
    }

    fn show_status_line(&self, ctx: &egui::Context) {
        if self.status.is_empty() {
            return;
        }
        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.status).weak());
        });
    }

    fn show_page(&mut self, ctx: &egui::Context) {
        let mut added: Option<Product> = None;
        let mut submit_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| match self.session.view() {
            StorefrontView::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.4);
                    ui.heading(LOADING_MESSAGE);
                });
            }
            StorefrontView::Ready { cart, products } => {
                ui.heading(egui::RichText::new(PAGE_TITLE).size(24.0));
                ui.add_space(8.0);
                show_cart(ui, &cart, &mut submit_clicked);
                ui.separator();
                show_products(ui, products, &mut added);
            }
        });

        if let Some(product) = added {
            self.add_to_cart(&product);
        }
        if submit_clicked {
            self.submit_order();
        }
    }
}

fn show_cart(ui: &mut egui::Ui, cart: &CartSection<'_>, submit_clicked: &mut bool) {
    ui.heading(CART_HEADING);
    match cart {
        CartSection::Empty => {
            ui.weak(EMPTY_CART_MESSAGE);
        }
        CartSection::Items(items) => {
            egui::Grid::new("cart_lines")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui| {
                    for item in items.iter() {
                        ui.label(&item.product.name);
                        ui.label(format!("x{}", item.quantity));
                        ui.label(item.product.price_label());
                        ui.end_row();
                    }
                });
            if ui.button(SUBMIT_LABEL).clicked() {
                *submit_clicked = true;
            }
        }
    }
}

fn show_products(ui: &mut egui::Ui, products: &[Product], added: &mut Option<Product>) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for product in products {
                egui::Frame::group(ui.style())
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .show(ui, |ui| {
                        ui.set_width(CARD_WIDTH);
                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(&product.name).strong());
                            ui.weak(&product.category);
                            ui.label(product.price_label());
                            if ui.button(ADD_TO_CART_LABEL).clicked() {
                                *added = Some(product.clone());
                            }
                        });
                    });
            }
        });
    });
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_line(ctx);
        self.show_page(ctx);
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
