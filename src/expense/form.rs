use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    expense::{Participant, ParticipantNames},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CURRENCY_SYMBOL, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
};

/// The form for adding a new expense and editing an existing one.
///
/// The form starts in "add" mode. app.js fills it in and switches it to
/// "edit" mode when an edit button in the expense table is clicked, and
/// submits it as JSON to `data-create-url` or `data-update-url`.
pub fn expense_form(today: Date, names: &ParticipantNames) -> Markup {
    html! {
        form
            id="expense-form"
            data-create-url=(endpoints::EXPENSES_API)
            data-update-url=(endpoints::EXPENSE)
            class="w-full space-y-4 md:space-y-6"
        {
            h2 id="expense-form-title" class="text-xl font-bold" { "Add Expense" }

            input type="hidden" id="expense-id" name="expense_id" value="";

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(today)
                    data-today=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="Category"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="payment_mode" class=(FORM_LABEL_STYLE) { "Payment Mode" }

                input
                    name="payment_mode"
                    id="payment_mode"
                    type="text"
                    placeholder="Cash, card, UPI, ..."
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="total_amount" class=(FORM_LABEL_STYLE)
                {
                    "Total Amount (" (CURRENCY_SYMBOL) ")"
                }

                div class="input-wrapper w-full"
                {
                    input
                        name="total_amount"
                        id="total_amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Paid By" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for participant in Participant::ALL {
                        @let id = format!("paid_by_{participant}");

                        div class="flex items-center gap-3"
                        {
                            input
                                name="paid_by"
                                id=(id)
                                type="radio"
                                value=(participant.as_str())
                                checked[participant == Participant::Person1]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                            {
                                (names.name_of(participant))
                            }
                        }
                    }
                }
            }

            div class="flex items-center gap-3"
            {
                input
                    name="equal_share"
                    id="equal_share"
                    type="checkbox"
                    checked
                    class=(FORM_RADIO_INPUT_STYLE);

                label for="equal_share" class="text-sm font-medium" { "Split equally" }
            }

            @for participant in Participant::ALL {
                @let id = format!("{participant}_share");

                div
                {
                    label for=(id) class=(FORM_LABEL_STYLE)
                    {
                        (names.name_of(participant)) "'s Share (" (CURRENCY_SYMBOL) ")"
                    }

                    div class="input-wrapper w-full"
                    {
                        input
                            name=(id)
                            id=(id)
                            type="number"
                            step="0.01"
                            min="0"
                            placeholder="0.00"
                            required
                            readonly
                            class={ "share-input " (FORM_TEXT_INPUT_STYLE) };
                    }
                }
            }

            p id="remaining-amount" class="text-sm text-gray-600 dark:text-gray-300"
            {
                "Unallocated: " (CURRENCY_SYMBOL) "0.00"
            }

            button type="submit" id="save-expense" class=(BUTTON_PRIMARY_STYLE)
            {
                "Add Expense"
            }

            button type="button" id="cancel-edit" class={ "hidden " (BUTTON_SECONDARY_STYLE) }
            {
                "Cancel"
            }
        }
    }
}
